//! Access Context - 角色与访问守卫
//!
//! 角色顺序: Staff < GM < SuperAdmin

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Staff,
    #[serde(rename = "GM")]
    Gm,
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Staff => "Staff",
            Role::Gm => "GM",
            Role::SuperAdmin => "SuperAdmin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Staff" => Some(Role::Staff),
            "GM" => Some(Role::Gm),
            "SuperAdmin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 已认证用户（来自 bearer token）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub role: Role,
    #[serde(default)]
    pub restaurants: Vec<String>,
}

impl AuthUser {
    /// SuperAdmin 可操作任意餐厅，其他角色仅限自身列表
    pub fn can_act_on(&self, restaurant_id: &str) -> bool {
        self.role == Role::SuperAdmin || self.restaurants.iter().any(|r| r == restaurant_id)
    }
}

/// 访问被拒绝
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Forbidden")]
    RoleNotAllowed { role: Role },

    #[error("Forbidden: restaurant {restaurant_id} is not assigned to this user")]
    RestaurantNotAssigned { restaurant_id: String },
}

/// 角色守卫
///
/// 在指令流水线执行前求值，可按允许集合或最低角色组合
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleGuard {
    /// 角色属于给定集合
    AnyOf(&'static [Role]),
    /// 角色不低于给定角色
    AtLeast(Role),
}

impl RoleGuard {
    pub fn allows(&self, role: Role) -> bool {
        match self {
            RoleGuard::AnyOf(roles) => roles.contains(&role),
            RoleGuard::AtLeast(min) => role >= *min,
        }
    }

    pub fn check(&self, user: &AuthUser) -> Result<(), AccessError> {
        if self.allows(user.role) {
            Ok(())
        } else {
            Err(AccessError::RoleNotAllowed { role: user.role })
        }
    }
}

/// 提交指令: GM, SuperAdmin
pub const COMMAND_SUBMITTERS: RoleGuard = RoleGuard::AnyOf(&[Role::Gm, Role::SuperAdmin]);

/// 查看日志: 所有角色
pub const LOG_READERS: RoleGuard = RoleGuard::AnyOf(&[Role::Gm, Role::Staff, Role::SuperAdmin]);

/// 导出日志: GM, SuperAdmin
pub const LOG_EXPORTERS: RoleGuard = RoleGuard::AtLeast(Role::Gm);

/// 餐厅与用户管理: SuperAdmin
pub const ADMINISTRATORS: RoleGuard = RoleGuard::AnyOf(&[Role::SuperAdmin]);

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            uid: "u1".to_string(),
            role,
            restaurants: vec!["r1".to_string()],
        }
    }

    #[test]
    fn test_role_ordering() {
        assert!(Role::Staff < Role::Gm);
        assert!(Role::Gm < Role::SuperAdmin);
    }

    #[test]
    fn test_role_serde_names() {
        assert_eq!(serde_json::to_string(&Role::Gm).unwrap(), "\"GM\"");
        let role: Role = serde_json::from_str("\"SuperAdmin\"").unwrap();
        assert_eq!(role, Role::SuperAdmin);
        assert_eq!(Role::from_str("GM"), Some(Role::Gm));
        assert_eq!(Role::from_str("gm"), None);
    }

    #[test]
    fn test_command_guard() {
        assert!(COMMAND_SUBMITTERS.check(&user(Role::Staff)).is_err());
        assert!(COMMAND_SUBMITTERS.check(&user(Role::Gm)).is_ok());
        assert!(COMMAND_SUBMITTERS.check(&user(Role::SuperAdmin)).is_ok());
    }

    #[test]
    fn test_at_least_guard_matches_export_roles() {
        assert!(!LOG_EXPORTERS.allows(Role::Staff));
        assert!(LOG_EXPORTERS.allows(Role::Gm));
        assert!(LOG_EXPORTERS.allows(Role::SuperAdmin));
        assert!(LOG_READERS.allows(Role::Staff));
        assert!(!ADMINISTRATORS.allows(Role::Gm));
    }

    #[test]
    fn test_restaurant_scope() {
        assert!(user(Role::Gm).can_act_on("r1"));
        assert!(!user(Role::Gm).can_act_on("r2"));
        assert!(user(Role::SuperAdmin).can_act_on("r2"));
    }
}
