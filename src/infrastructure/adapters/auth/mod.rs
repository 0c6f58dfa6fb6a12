//! Auth Adapters - 令牌签发与身份校验

mod jwt_identity_verifier;
mod jwt_token_service;

pub use jwt_identity_verifier::JwtIdentityVerifier;
pub use jwt_token_service::JwtTokenService;
