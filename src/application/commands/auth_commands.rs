//! Auth Commands

use crate::domain::AuthUser;

/// 用外部身份 ID token 换取访问令牌
#[derive(Debug, Clone)]
pub struct ExchangeIdToken {
    pub id_token: String,
}

/// 换取结果
#[derive(Debug, Clone)]
pub struct ExchangeIdTokenResponse {
    pub token: String,
    pub user: AuthUser,
}
