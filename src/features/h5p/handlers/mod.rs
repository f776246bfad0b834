mod h5p_handler;

pub use h5p_handler::*;
