//! JWT Identity Verifier
//!
//! 外部身份提供方签发的 HS256 ID token，`sub` 即 uid

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::application::ports::{IdentityError, IdentityVerifierPort};

#[derive(Debug, Serialize, Deserialize)]
struct IdentityClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// HS256 ID token 校验器
pub struct JwtIdentityVerifier {
    decoding_key: DecodingKey,
}

impl JwtIdentityVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// 用同一密钥签发 ID token（本地开发与测试）
    pub fn mint(secret: &str, uid: &str, ttl_secs: u64) -> Result<String, IdentityError> {
        let now = Utc::now().timestamp();
        let claims = IdentityClaims {
            sub: uid.to_string(),
            iat: now,
            exp: now + ttl_secs as i64,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| IdentityError(e.to_string()))
    }
}

#[async_trait]
impl IdentityVerifierPort for JwtIdentityVerifier {
    async fn verify_id_token(&self, id_token: &str) -> Result<String, IdentityError> {
        let data = decode::<IdentityClaims>(
            id_token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| IdentityError(e.to_string()))?;

        if data.claims.sub.is_empty() {
            return Err(IdentityError("missing subject".to_string()));
        }

        Ok(data.claims.sub)
    }
}
