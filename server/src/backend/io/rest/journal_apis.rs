//! # REST API for Journal Entries
//!
//! Entry CRUD plus the filtered listing, by-date grouping and mood summary
//! views. All routes live under `/api/users/:user_id/entries`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::info;

use crate::backend::io::rest::error::{respond, ApiError};
use crate::backend::io::rest::extract::{ApiJson, ApiPath, ApiQuery};
use crate::backend::io::rest::mappers::entry_mapper::EntryMapper;
use crate::backend::AppState;
use shared::{
    CreateEntryRequest, DeleteEntryResponse, EntryListQuery, EntryListResponse, UpdateEntryRequest,
};

/// Create a router for journal entry APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/entries", get(list_entries).post(create_entry))
        .route("/entries/by-date", get(entries_by_date))
        .route("/entries/mood-summary", get(mood_summary))
        .route(
            "/entries/:entry_id",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}

pub async fn list_entries(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
    ApiQuery(query): ApiQuery<EntryListQuery>,
) -> Response {
    info!("GET /api/users/{}/entries - query: {:?}", user_id, query);

    let filter = match EntryMapper::to_filter(query) {
        Ok(filter) => filter,
        Err(e) => return ApiError::from(e).into_response(),
    };

    match state.journal_service.list_entries(&user_id, &filter).await {
        Ok(entries) => {
            let response = EntryListResponse {
                total: entries.len(),
                entries: EntryMapper::to_dto_list(entries),
            };
            respond(StatusCode::OK, response)
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn create_entry(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
    ApiJson(request): ApiJson<CreateEntryRequest>,
) -> Response {
    info!("POST /api/users/{}/entries - mood: {}", user_id, request.mood);

    let command = match EntryMapper::to_create_command(user_id, request) {
        Ok(command) => command,
        Err(e) => return ApiError::from(e).into_response(),
    };

    match state.journal_service.create_entry(command).await {
        Ok(result) => respond(StatusCode::CREATED, EntryMapper::to_create_response(result)),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn entries_by_date(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
    ApiQuery(query): ApiQuery<EntryListQuery>,
) -> Response {
    info!("GET /api/users/{}/entries/by-date", user_id);

    let filter = match EntryMapper::to_filter(query) {
        Ok(filter) => filter,
        Err(e) => return ApiError::from(e).into_response(),
    };

    match state.journal_service.entries_by_date(&user_id, &filter).await {
        Ok(groups) => respond(StatusCode::OK, EntryMapper::to_date_groups(groups)),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn mood_summary(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
    ApiQuery(query): ApiQuery<EntryListQuery>,
) -> Response {
    info!("GET /api/users/{}/entries/mood-summary", user_id);

    let filter = match EntryMapper::to_filter(query) {
        Ok(filter) => filter,
        Err(e) => return ApiError::from(e).into_response(),
    };

    match state.journal_service.mood_summary(&user_id, &filter).await {
        Ok(stats) => respond(StatusCode::OK, EntryMapper::to_mood_summary(stats)),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn get_entry(
    State(state): State<AppState>,
    ApiPath((user_id, entry_id)): ApiPath<(String, String)>,
) -> Response {
    info!("GET /api/users/{}/entries/{}", user_id, entry_id);

    match state.journal_service.get_entry(&user_id, &entry_id).await {
        Ok(entry) => respond(StatusCode::OK, EntryMapper::to_dto(entry)),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn update_entry(
    State(state): State<AppState>,
    ApiPath((user_id, entry_id)): ApiPath<(String, String)>,
    ApiJson(request): ApiJson<UpdateEntryRequest>,
) -> Response {
    info!("PUT /api/users/{}/entries/{}", user_id, entry_id);

    let command = EntryMapper::to_update_command(request);
    match state
        .journal_service
        .update_entry(&user_id, &entry_id, command)
        .await
    {
        Ok(entry) => respond(StatusCode::OK, EntryMapper::to_dto(entry)),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn delete_entry(
    State(state): State<AppState>,
    ApiPath((user_id, entry_id)): ApiPath<(String, String)>,
) -> Response {
    info!("DELETE /api/users/{}/entries/{}", user_id, entry_id);

    match state.journal_service.delete_entry(&user_id, &entry_id).await {
        Ok(()) => respond(StatusCode::OK, DeleteEntryResponse { deleted_id: entry_id }),
        Err(e) => ApiError::from(e).into_response(),
    }
}
