//! Admin Commands - 餐厅与用户管理

use crate::domain::Role;

/// 创建或更新餐厅
#[derive(Debug, Clone)]
pub struct UpsertRestaurant {
    pub id: String,
    pub name: String,
    pub locale: String,
}

/// 删除餐厅
#[derive(Debug, Clone)]
pub struct DeleteRestaurant {
    pub id: String,
}

/// 创建或更新用户
#[derive(Debug, Clone)]
pub struct UpsertUser {
    pub uid: String,
    pub role: Role,
    pub restaurants: Vec<String>,
}
