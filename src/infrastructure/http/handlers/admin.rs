//! Admin HTTP Handlers
//!
//! 餐厅与用户管理，仅 SuperAdmin

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{DeleteRestaurant, UpsertRestaurant, UpsertUser};
use crate::domain::access::ADMINISTRATORS;
use crate::infrastructure::http::dto::{OkResponse, RestaurantRequest, UserRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::Authenticated;
use crate::infrastructure::http::state::AppState;

fn invalid_body(_: JsonRejection) -> ApiError {
    ApiError::BadRequest("Invalid body".to_string())
}

/// 创建或更新餐厅
pub async fn upsert_restaurant(
    State(state): State<Arc<AppState>>,
    Authenticated(user): Authenticated,
    payload: Result<Json<RestaurantRequest>, JsonRejection>,
) -> Result<Json<OkResponse>, ApiError> {
    ADMINISTRATORS.check(&user)?;
    let Json(request) = payload.map_err(invalid_body)?;

    state
        .upsert_restaurant_handler
        .handle(UpsertRestaurant {
            id: request.id,
            name: request.name,
            locale: request.locale,
        })
        .await?;

    Ok(Json(OkResponse::ok()))
}

/// 删除餐厅（级联删除审计记录）
pub async fn delete_restaurant(
    State(state): State<Arc<AppState>>,
    Authenticated(user): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiError> {
    ADMINISTRATORS.check(&user)?;

    state
        .delete_restaurant_handler
        .handle(DeleteRestaurant { id })
        .await?;

    Ok(Json(OkResponse::ok()))
}

/// 创建或更新用户
pub async fn upsert_user(
    State(state): State<Arc<AppState>>,
    Authenticated(user): Authenticated,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<OkResponse>, ApiError> {
    ADMINISTRATORS.check(&user)?;
    let Json(request) = payload.map_err(invalid_body)?;

    state
        .upsert_user_handler
        .handle(UpsertUser {
            uid: request.uid,
            role: request.role,
            restaurants: request.restaurants,
        })
        .await?;

    Ok(Json(OkResponse::ok()))
}
