use super::{AppState, error::ApiError};
use crate::contact::{self, ContactStatus, ContactSubmission, InboxStats, ListQuery, NewSubmission};
use crate::portfolio::{Portfolio, PortfolioContent, PortfolioUpdate};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// A JSON body whose rejection is reported like any other API error
type JsonBody<T> = Result<Json<T>, JsonRejection>;

#[derive(Deserialize)]
pub struct StatusUpdate {
    status: String,
}

#[derive(Serialize)]
pub struct StatusUpdated {
    message: &'static str,
    submission: ContactSubmission,
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "message": "Portfolio API is running", "status": "ok" }))
}

pub async fn get_portfolio_handler(State(state): State<Arc<AppState>>) -> ApiResult<Portfolio> {
    Ok(Json(state.portfolio.current()?))
}

pub async fn create_portfolio_handler(
    State(state): State<Arc<AppState>>,
    body: JsonBody<PortfolioContent>,
) -> ApiResult<Portfolio> {
    let Json(content) = body?;
    Ok(Json(state.portfolio.create(content)?))
}

pub async fn update_portfolio_handler(
    State(state): State<Arc<AppState>>,
    body: JsonBody<PortfolioUpdate>,
) -> ApiResult<Portfolio> {
    let Json(update) = body?;
    Ok(Json(state.portfolio.update(update)?))
}

pub async fn submit_contact_handler(
    State(state): State<Arc<AppState>>,
    body: JsonBody<NewSubmission>,
) -> ApiResult<ContactSubmission> {
    let Json(submission) = body?;
    Ok(Json(state.inbox.submit(submission)?))
}

pub async fn list_contacts_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Vec<ContactSubmission>> {
    let Query(query) = query?;
    Ok(Json(state.inbox.list(&query)))
}

pub async fn contact_stats_handler(State(state): State<Arc<AppState>>) -> Json<InboxStats> {
    Json(state.inbox.stats())
}

pub async fn update_contact_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: JsonBody<StatusUpdate>,
) -> ApiResult<StatusUpdated> {
    let id = contact::parse_id(&id)?;
    let Json(update) = body?;
    let status = ContactStatus::parse(&update.status)?;
    let submission = state.inbox.update_status(id, status)?;
    Ok(Json(StatusUpdated { message: "Status updated successfully", submission }))
}
