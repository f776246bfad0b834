mod h5p_dto;

pub use h5p_dto::*;
