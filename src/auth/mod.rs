pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{validate_jwt, JwtKeys};
