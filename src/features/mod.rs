pub mod auth;
pub mod h5p;
