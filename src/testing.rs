//! 测试辅助：内存数据库、录制型投递客户端、脚本化消息渠道

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::application::ports::{
    ChannelError, DispatchClientPort, DispatchRequest, MessagingChannelPort,
    RecipientDirectoryPort, RestaurantRecord, RestaurantRepositoryPort,
};
use crate::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, DbPool, SqliteRestaurantRepository,
};

/// 已迁移的内存数据库
pub async fn memory_pool() -> DbPool {
    let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

pub async fn seed_restaurant(pool: &DbPool, id: &str) {
    SqliteRestaurantRepository::new(pool.clone())
        .save(&RestaurantRecord {
            id: id.to_string(),
            name: format!("Restaurant {}", id),
            locale: "es".to_string(),
        })
        .await
        .unwrap();
}

/// 只记录、不投递
#[derive(Default)]
pub struct RecordingDispatchClient {
    requests: Mutex<Vec<DispatchRequest>>,
}

impl RecordingDispatchClient {
    pub fn requests(&self) -> Vec<DispatchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl DispatchClientPort for RecordingDispatchClient {
    fn submit(&self, request: DispatchRequest) {
        self.requests.lock().unwrap().push(request);
    }
}

/// 一次发送尝试
#[derive(Debug, Clone)]
pub struct SendAttempt {
    pub to: String,
    pub at: Instant,
}

/// 按脚本返回结果的消息渠道；脚本用尽后一律成功
#[derive(Default)]
pub struct ScriptedChannel {
    script: Mutex<VecDeque<Result<(), u16>>>,
    failing: Mutex<Vec<String>>,
    attempts: Mutex<Vec<SendAttempt>>,
}

impl ScriptedChannel {
    /// 依次返回给定结果，`Err(status)` 表示远端拒绝
    pub fn with_script(script: impl IntoIterator<Item = Result<(), u16>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            ..Default::default()
        }
    }

    /// 指定收件人总是失败
    pub fn failing_for(recipients: &[&str]) -> Self {
        Self {
            failing: Mutex::new(recipients.iter().map(|r| r.to_string()).collect()),
            ..Default::default()
        }
    }

    pub fn attempts(&self) -> Vec<SendAttempt> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn attempts_for(&self, to: &str) -> usize {
        self.attempts().iter().filter(|a| a.to == to).count()
    }
}

#[async_trait]
impl MessagingChannelPort for ScriptedChannel {
    async fn send_text(&self, to: &str, _text: &str) -> Result<(), ChannelError> {
        self.attempts.lock().unwrap().push(SendAttempt {
            to: to.to_string(),
            at: Instant::now(),
        });

        if self.failing.lock().unwrap().iter().any(|r| r == to) {
            return Err(ChannelError::Rejected {
                status: 500,
                body: "always failing".to_string(),
            });
        }

        match self.script.lock().unwrap().pop_front() {
            Some(Err(status)) => Err(ChannelError::Rejected {
                status,
                body: "scripted failure".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// 固定收件人列表
pub struct FixedDirectory(pub Vec<String>);

impl FixedDirectory {
    pub fn of(recipients: &[&str]) -> Self {
        Self(recipients.iter().map(|r| r.to_string()).collect())
    }
}

#[async_trait]
impl RecipientDirectoryPort for FixedDirectory {
    async fn resolve(&self, _restaurant_id: &str, _target: &str) -> Vec<String> {
        self.0.clone()
    }
}

/// 在随机端口启动本地 stub 服务，返回 base URL
pub async fn spawn_stub(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
