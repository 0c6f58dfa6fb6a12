//! SubmitCommand Handler
//!
//! 解析 → 写审计记录（enviado）→ 非阻塞提交投递子系统

use std::sync::Arc;

use crate::application::commands::{SubmitCommand, SubmitCommandResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    CommandLogRepositoryPort, DispatchClientPort, DispatchRequest, NewCommandLog,
};
use crate::domain::{AccessError, CommandParser, CommandStatus};

/// 指令输入最小长度（字符）
const MIN_INPUT_CHARS: usize = 3;

/// SubmitCommand Handler
pub struct SubmitCommandHandler {
    parser: Arc<CommandParser>,
    audit_log: Arc<dyn CommandLogRepositoryPort>,
    dispatch_client: Arc<dyn DispatchClientPort>,
}

impl SubmitCommandHandler {
    pub fn new(
        parser: Arc<CommandParser>,
        audit_log: Arc<dyn CommandLogRepositoryPort>,
        dispatch_client: Arc<dyn DispatchClientPort>,
    ) -> Self {
        Self {
            parser,
            audit_log,
            dispatch_client,
        }
    }

    pub async fn handle(
        &self,
        command: SubmitCommand,
    ) -> Result<SubmitCommandResponse, ApplicationError> {
        if command.input.chars().count() < MIN_INPUT_CHARS {
            return Err(ApplicationError::invalid_payload("Invalid payload"));
        }

        let parsed = self.parser.parse(&command.input)?;

        if !command.submitter.can_act_on(parsed.restaurant_id()) {
            return Err(AccessError::RestaurantNotAssigned {
                restaurant_id: parsed.restaurant_id().to_string(),
            }
            .into());
        }

        let (target, restaurant_id, message) = parsed.into_parts();

        let id = self
            .audit_log
            .append(NewCommandLog {
                restaurant_id: restaurant_id.clone(),
                role: command.submitter.role,
                target: target.clone(),
                message: message.clone(),
            })
            .await?;

        tracing::info!(
            log_id = %id,
            restaurant_id = %restaurant_id,
            target = %target,
            uid = %command.submitter.uid,
            "Command logged"
        );

        // 不等待投递结果，状态由回写流程更新
        self.dispatch_client.submit(DispatchRequest {
            log_id: id,
            restaurant_id: restaurant_id.clone(),
            target: target.clone(),
            message: message.clone(),
        });

        Ok(SubmitCommandResponse {
            id,
            target,
            restaurant_id,
            message,
            status: CommandStatus::Enviado,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthUser, Role};
    use crate::infrastructure::persistence::sqlite::SqliteCommandLogRepository;
    use crate::testing::{memory_pool, seed_restaurant, RecordingDispatchClient};

    fn gm(restaurants: &[&str]) -> AuthUser {
        AuthUser {
            uid: "gm-1".to_string(),
            role: Role::Gm,
            restaurants: restaurants.iter().map(|r| r.to_string()).collect(),
        }
    }

    async fn setup() -> (
        SubmitCommandHandler,
        Arc<SqliteCommandLogRepository>,
        Arc<RecordingDispatchClient>,
    ) {
        let pool = memory_pool().await;
        seed_restaurant(&pool, "r1").await;
        let audit_log = Arc::new(SqliteCommandLogRepository::new(pool));
        let dispatch = Arc::new(RecordingDispatchClient::default());
        let handler = SubmitCommandHandler::new(
            Arc::new(CommandParser::default()),
            audit_log.clone(),
            dispatch.clone(),
        );
        (handler, audit_log, dispatch)
    }

    #[tokio::test]
    async fn test_submit_logs_and_dispatches() {
        let (handler, audit_log, dispatch) = setup().await;

        let response = handler
            .handle(SubmitCommand {
                input: "/Chef[r1]: marchando mesa 5".to_string(),
                submitter: gm(&["r1"]),
            })
            .await
            .unwrap();

        assert_eq!(response.target, "chef");
        assert_eq!(response.restaurant_id, "r1");
        assert_eq!(response.message, "marchando mesa 5");
        assert_eq!(response.status, CommandStatus::Enviado);

        let record = audit_log.find_by_id(response.id).await.unwrap().unwrap();
        assert_eq!(record.role, Role::Gm);
        assert_eq!(record.status, CommandStatus::Enviado);
        assert!(record.updated_at.is_none());

        let submitted = dispatch.requests();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].log_id, response.id);
        assert_eq!(submitted[0].target, "chef");
    }

    #[tokio::test]
    async fn test_syntax_error_writes_nothing() {
        let (handler, audit_log, dispatch) = setup().await;

        let err = handler
            .handle(SubmitCommand {
                input: "not a command".to_string(),
                submitter: gm(&["r1"]),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::InvalidSyntax(_)));
        let logs = audit_log
            .query(&Default::default(), 10)
            .await
            .unwrap();
        assert!(logs.is_empty());
        assert!(dispatch.requests().is_empty());
    }

    #[tokio::test]
    async fn test_short_input_is_invalid_payload() {
        let (handler, _, _) = setup().await;
        let err = handler
            .handle(SubmitCommand {
                input: "/a".to_string(),
                submitter: gm(&["r1"]),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn test_restaurant_outside_scope_is_forbidden() {
        let (handler, _, dispatch) = setup().await;
        let err = handler
            .handle(SubmitCommand {
                input: "/chef[r1]: hola".to_string(),
                submitter: gm(&["r2"]),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Forbidden(_)));
        assert!(dispatch.requests().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_restaurant_is_storage_error() {
        let (handler, _, dispatch) = setup().await;
        let submitter = AuthUser {
            uid: "root".to_string(),
            role: Role::SuperAdmin,
            restaurants: vec![],
        };
        let err = handler
            .handle(SubmitCommand {
                input: "/chef[missing]: hola".to_string(),
                submitter,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::StorageError(_)));
        assert!(dispatch.requests().is_empty());
    }
}
