//! Admin Command Handlers - 餐厅与用户管理

use std::sync::Arc;

use crate::application::commands::{DeleteRestaurant, UpsertRestaurant, UpsertUser};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    RestaurantRecord, RestaurantRepositoryPort, UserRecord, UserRepositoryPort,
};

// ============================================================================
// UpsertRestaurant
// ============================================================================

/// UpsertRestaurant Handler
pub struct UpsertRestaurantHandler {
    restaurant_repo: Arc<dyn RestaurantRepositoryPort>,
}

impl UpsertRestaurantHandler {
    pub fn new(restaurant_repo: Arc<dyn RestaurantRepositoryPort>) -> Self {
        Self { restaurant_repo }
    }

    pub async fn handle(&self, command: UpsertRestaurant) -> Result<(), ApplicationError> {
        if command.id.trim().is_empty() || command.name.trim().is_empty() {
            return Err(ApplicationError::invalid_payload("Invalid body"));
        }

        let restaurant = RestaurantRecord {
            id: command.id,
            name: command.name,
            locale: command.locale,
        };
        self.restaurant_repo.save(&restaurant).await?;

        tracing::info!(restaurant_id = %restaurant.id, name = %restaurant.name, "Restaurant saved");
        Ok(())
    }
}

// ============================================================================
// DeleteRestaurant
// ============================================================================

/// DeleteRestaurant Handler
///
/// 删除餐厅会级联删除其所有审计记录
pub struct DeleteRestaurantHandler {
    restaurant_repo: Arc<dyn RestaurantRepositoryPort>,
}

impl DeleteRestaurantHandler {
    pub fn new(restaurant_repo: Arc<dyn RestaurantRepositoryPort>) -> Self {
        Self { restaurant_repo }
    }

    pub async fn handle(&self, command: DeleteRestaurant) -> Result<(), ApplicationError> {
        if !self.restaurant_repo.delete(&command.id).await? {
            return Err(ApplicationError::not_found("Restaurant", &command.id));
        }

        tracing::info!(restaurant_id = %command.id, "Restaurant deleted");
        Ok(())
    }
}

// ============================================================================
// UpsertUser
// ============================================================================

/// UpsertUser Handler
pub struct UpsertUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl UpsertUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, command: UpsertUser) -> Result<(), ApplicationError> {
        if command.uid.trim().is_empty() {
            return Err(ApplicationError::invalid_payload("Invalid body"));
        }

        let user = UserRecord {
            uid: command.uid,
            role: command.role,
            restaurants: command.restaurants,
        };
        self.user_repo.save(&user).await?;

        tracing::info!(uid = %user.uid, role = %user.role, "User saved");
        Ok(())
    }
}
