mod jwt_verifier;

pub use jwt_verifier::{AdminClaims, AuthError, JwtVerifier};
