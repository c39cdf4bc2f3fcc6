//! Author pages

use axum::{
    extract::{Path, State},
    Form,
};

use crate::{error::AppResult, services::FormOutcome, validation::FormData, views::View, AppState};

pub async fn list(State(state): State<AppState>) -> AppResult<View> {
    state.services.authors.list().await
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<View> {
    state.services.authors.detail(id).await
}

pub async fn create_form(State(state): State<AppState>) -> View {
    state.services.authors.create_form()
}

pub async fn create(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<FormOutcome> {
    state.services.authors.create(&FormData::new(pairs)).await
}

pub async fn update_form(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<View> {
    state.services.authors.update_form(id).await
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<FormOutcome> {
    state.services.authors.update(id, &FormData::new(pairs)).await
}

pub async fn delete_form(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<View> {
    state.services.authors.delete_form(id).await
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<FormOutcome> {
    state.services.authors.delete(id).await
}
