use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::db::{NewPirateGroup, PirateGroupPatch};
use crate::services::{CrewMemberView, PirateGroupView};

#[derive(Debug, Deserialize)]
pub struct GetQuery {
    #[serde(default)]
    pub include_members: bool,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn list_groups(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<PirateGroupView>>>, ApiError> {
    let groups = state.group_service.list().await?;
    let message = format!("Found {} pirate groups", groups.len());
    Ok(Json(ApiResponse::with_message(groups, message)))
}

pub async fn get_group(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Query(query): Query<GetQuery>,
) -> Result<Json<ApiResponse<PirateGroupView>>, ApiError> {
    let group = state.group_service.get(id, query.include_members).await?;
    Ok(Json(ApiResponse::success(group)))
}

pub async fn create_group(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewPirateGroup>,
) -> Result<(StatusCode, Json<ApiResponse<PirateGroupView>>), ApiError> {
    let group = state.group_service.create(payload).await?;
    let message = format!("Pirate group '{}' created", group.name);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(group, message)),
    ))
}

pub async fn update_group(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(patch): Json<PirateGroupPatch>,
) -> Result<Json<ApiResponse<PirateGroupView>>, ApiError> {
    let group = state.group_service.update(id, patch).await?;
    let message = format!("Pirate group '{}' updated", group.name);
    Ok(Json(ApiResponse::with_message(group, message)))
}

pub async fn delete_group(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let name = state.group_service.delete(id).await?;
    Ok(Json(ApiResponse::message(format!(
        "Pirate group '{name}' deleted"
    ))))
}

pub async fn search_groups(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<PirateGroupView>>>, ApiError> {
    let groups = state.group_service.search(&query.q).await?;
    let message = format!("Found {} pirate groups", groups.len());
    Ok(Json(ApiResponse::with_message(groups, message)))
}

pub async fn list_group_members(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<CrewMemberView>>>, ApiError> {
    let listing = state.group_service.members(id).await?;
    let message = format!(
        "{} has {} crew members",
        listing.group_name,
        listing.members.len()
    );
    Ok(Json(ApiResponse::with_message(listing.members, message)))
}
