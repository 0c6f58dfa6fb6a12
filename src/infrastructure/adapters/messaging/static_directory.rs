//! Static Recipient Directory
//!
//! 收件人按 (餐厅, 工位) 配置，未配置时使用兜底列表

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

use crate::application::ports::RecipientDirectoryPort;

/// 一条收件人路由
#[derive(Debug, Clone, Deserialize)]
pub struct RecipientRoute {
    pub restaurant_id: String,
    pub target: String,
    pub recipients: Vec<String>,
}

/// 静态收件人目录
pub struct StaticRecipientDirectory {
    routes: HashMap<(String, String), Vec<String>>,
    fallback: Vec<String>,
}

impl StaticRecipientDirectory {
    pub fn new(routes: impl IntoIterator<Item = RecipientRoute>, fallback: Vec<String>) -> Self {
        let routes = routes
            .into_iter()
            .map(|r| ((r.restaurant_id, r.target.to_lowercase()), r.recipients))
            .collect();

        Self { routes, fallback }
    }
}

#[async_trait]
impl RecipientDirectoryPort for StaticRecipientDirectory {
    async fn resolve(&self, restaurant_id: &str, target: &str) -> Vec<String> {
        let key = (restaurant_id.to_string(), target.to_lowercase());
        match self.routes.get(&key) {
            Some(recipients) => recipients.clone(),
            None => self.fallback.clone(),
        }
    }
}
