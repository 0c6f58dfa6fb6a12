//! Identity Ports - 访问令牌与身份校验

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::AuthUser;

/// 访问令牌错误
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// 签发的访问令牌
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in_secs: u64,
}

/// Token Service Port
///
/// 令牌携带角色与餐厅列表，有效期内不撤销
pub trait TokenServicePort: Send + Sync {
    fn issue(&self, user: &AuthUser) -> Result<IssuedToken, TokenError>;

    fn verify(&self, token: &str) -> Result<AuthUser, TokenError>;
}

/// 身份校验错误
#[derive(Debug, Error)]
#[error("Invalid identity token: {0}")]
pub struct IdentityError(pub String);

/// Identity Verifier Port
///
/// 外部身份提供方的 ID token → uid
#[async_trait]
pub trait IdentityVerifierPort: Send + Sync {
    async fn verify_id_token(&self, id_token: &str) -> Result<String, IdentityError>;
}
