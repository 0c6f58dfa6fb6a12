//! Auth Command Handlers
//!
//! 外部 ID token → uid → 用户角色 → 访问令牌

use std::sync::Arc;

use crate::application::commands::{ExchangeIdToken, ExchangeIdTokenResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::{IdentityVerifierPort, TokenServicePort, UserRepositoryPort};
use crate::domain::AuthUser;

/// ExchangeIdToken Handler
pub struct ExchangeTokenHandler {
    identity_verifier: Arc<dyn IdentityVerifierPort>,
    user_repo: Arc<dyn UserRepositoryPort>,
    token_service: Arc<dyn TokenServicePort>,
}

impl ExchangeTokenHandler {
    pub fn new(
        identity_verifier: Arc<dyn IdentityVerifierPort>,
        user_repo: Arc<dyn UserRepositoryPort>,
        token_service: Arc<dyn TokenServicePort>,
    ) -> Self {
        Self {
            identity_verifier,
            user_repo,
            token_service,
        }
    }

    pub async fn handle(
        &self,
        command: ExchangeIdToken,
    ) -> Result<ExchangeIdTokenResponse, ApplicationError> {
        let uid = self
            .identity_verifier
            .verify_id_token(&command.id_token)
            .await?;

        let user = self
            .user_repo
            .find_by_uid(&uid)
            .await?
            .ok_or_else(|| ApplicationError::forbidden("User not provisioned"))?;

        let user = AuthUser {
            uid: user.uid,
            role: user.role,
            restaurants: user.restaurants,
        };
        let issued = self.token_service.issue(&user)?;

        tracing::info!(uid = %user.uid, role = %user.role, "Access token issued");

        Ok(ExchangeIdTokenResponse {
            token: issued.token,
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{UserRecord, UserRepositoryPort};
    use crate::domain::Role;
    use crate::infrastructure::adapters::auth::{JwtIdentityVerifier, JwtTokenService};
    use crate::infrastructure::persistence::sqlite::SqliteUserRepository;
    use crate::testing::memory_pool;

    const IDENTITY_SECRET: &str = "identity-secret";

    async fn setup() -> (ExchangeTokenHandler, Arc<JwtTokenService>) {
        let users = Arc::new(SqliteUserRepository::new(memory_pool().await));
        users
            .save(&UserRecord {
                uid: "gm-1".to_string(),
                role: Role::Gm,
                restaurants: vec!["r1".to_string()],
            })
            .await
            .unwrap();
        let tokens = Arc::new(JwtTokenService::new("access-secret", 3600));
        let handler = ExchangeTokenHandler::new(
            Arc::new(JwtIdentityVerifier::new(IDENTITY_SECRET)),
            users,
            tokens.clone(),
        );
        (handler, tokens)
    }

    #[tokio::test]
    async fn test_exchange_issues_token_with_role() {
        let (handler, tokens) = setup().await;
        let id_token = JwtIdentityVerifier::mint(IDENTITY_SECRET, "gm-1", 600).unwrap();

        let response = handler
            .handle(ExchangeIdToken { id_token })
            .await
            .unwrap();

        assert_eq!(response.user.role, Role::Gm);
        let verified = tokens.verify(&response.token).unwrap();
        assert_eq!(verified, response.user);
    }

    #[tokio::test]
    async fn test_unprovisioned_user_is_forbidden() {
        let (handler, _) = setup().await;
        let id_token = JwtIdentityVerifier::mint(IDENTITY_SECRET, "stranger", 600).unwrap();

        let err = handler
            .handle(ExchangeIdToken { id_token })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_bad_id_token_is_unauthorized() {
        let (handler, _) = setup().await;
        let err = handler
            .handle(ExchangeIdToken {
                id_token: "garbage".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }
}
