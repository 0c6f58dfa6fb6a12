//! JWT Token Service - HS256 访问令牌

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::application::ports::{IssuedToken, TokenError, TokenServicePort};
use crate::domain::{AuthUser, Role};

/// 访问令牌载荷
#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    uid: String,
    role: Role,
    #[serde(default)]
    restaurants: Vec<String>,
    iat: i64,
    exp: i64,
}

/// HS256 访问令牌服务
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: u64,
}

impl JwtTokenService {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }
}

impl TokenServicePort for JwtTokenService {
    fn issue(&self, user: &AuthUser) -> Result<IssuedToken, TokenError> {
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            uid: user.uid.clone(),
            role: user.role,
            restaurants: user.restaurants.clone(),
            iat: now,
            exp: now + self.ttl_secs as i64,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_in_secs: self.ttl_secs,
        })
    }

    fn verify(&self, token: &str) -> Result<AuthUser, TokenError> {
        let data = decode::<AccessClaims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(e.to_string()),
        })?;

        Ok(AuthUser {
            uid: data.claims.uid,
            role: data.claims.role,
            restaurants: data.claims.restaurants,
        })
    }
}
