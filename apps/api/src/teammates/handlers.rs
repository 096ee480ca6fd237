use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;
use crate::teammates::search::{Page, Pagination, TeammateCard, TeammateFilter};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub skills: Option<String>,
    pub availability: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub skill: Option<String>,
    pub availability: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub count: usize,
    pub teammates: Vec<TeammateCard>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub teammates: Vec<TeammateCard>,
    pub pagination: Pagination,
}

/// GET /api/v1/teammates/search
pub async fn handle_search_teammates(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let filter = TeammateFilter::new(query.skills.as_deref(), query.availability.as_deref());
    let teammates: Vec<TeammateCard> = state
        .profiles
        .search(&filter)
        .await?
        .into_iter()
        .map(TeammateCard::from)
        .collect();
    Ok(Json(SearchResponse {
        count: teammates.len(),
        teammates,
    }))
}

/// GET /api/v1/teammates
pub async fn handle_list_teammates(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, AppError> {
    let filter = TeammateFilter::new(query.skill.as_deref(), query.availability.as_deref());
    let page = Page::new(query.page, query.limit);
    let (profiles, total) = state.profiles.list(&filter, page).await?;
    Ok(Json(ListResponse {
        teammates: profiles.into_iter().map(TeammateCard::from).collect(),
        pagination: Pagination::new(total, page),
    }))
}
