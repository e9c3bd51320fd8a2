use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::db::{CrewMemberPatch, NewCrewMember};
use crate::services::CrewMemberView;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub pirate_group_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn list_members(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<CrewMemberView>>>, ApiError> {
    let members = state.crew_service.list(query.pirate_group_id).await?;
    let message = format!("Found {} crew members", members.len());
    Ok(Json(ApiResponse::with_message(members, message)))
}

pub async fn get_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CrewMemberView>>, ApiError> {
    let member = state.crew_service.get(id).await?;
    Ok(Json(ApiResponse::success(member)))
}

pub async fn create_member(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewCrewMember>,
) -> Result<(StatusCode, Json<ApiResponse<CrewMemberView>>), ApiError> {
    let member = state.crew_service.create(payload).await?;
    let message = format!("Crew member '{}' created", member.name);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(member, message)),
    ))
}

pub async fn update_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(patch): Json<CrewMemberPatch>,
) -> Result<Json<ApiResponse<CrewMemberView>>, ApiError> {
    let member = state.crew_service.update(id, patch).await?;
    let message = format!("Crew member '{}' updated", member.name);
    Ok(Json(ApiResponse::with_message(member, message)))
}

pub async fn delete_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let name = state.crew_service.delete(id).await?;
    Ok(Json(ApiResponse::message(format!(
        "Crew member '{name}' deleted"
    ))))
}

pub async fn search_members(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<CrewMemberView>>>, ApiError> {
    let members = state.crew_service.search(&query.q).await?;
    let message = format!("Found {} crew members", members.len());
    Ok(Json(ApiResponse::with_message(members, message)))
}
