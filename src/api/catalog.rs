//! Catalog home page

use axum::{extract::State, response::Redirect};

use crate::{error::AppResult, views::View, AppState};

pub async fn root() -> Redirect {
    Redirect::to("/catalog")
}

pub async fn index(State(state): State<AppState>) -> AppResult<View> {
    state.services.catalog.index().await
}
