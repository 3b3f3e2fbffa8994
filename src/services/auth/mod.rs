pub mod access_jwt;
pub mod claims;
pub mod factory;
pub mod policy;

pub use access_jwt::{AccessJwtError, AuthService};
pub use claims::Claims;
pub use factory::build_auth_service;
pub use policy::AuthzError;
