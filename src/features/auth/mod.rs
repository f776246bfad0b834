mod gate;
mod jwks;
mod validator;

pub mod model;

pub use gate::{AuthorizationGate, PermissionGate};
pub use jwks::JwksClient;
pub use validator::JwtValidator;
