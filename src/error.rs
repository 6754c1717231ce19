extern crate serde_json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("recipe not found: {0}")]
    NotFound(String),
    #[error("recipe title is missing")]
    MissingTitle,
    #[error("invalid recipe id: {0}")]
    InvalidId(String),
    #[error("could not access recipe file: {0}")]
    RecipeIo(#[from] std::io::Error),
    #[error("could not read recipe file: {0}")]
    RecipeMisformat(#[from] serde_json::Error),
    #[error("could not render page: {0}")]
    Render(#[from] askama::Error),
    #[error("storage task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for RecipeError {
    fn into_response(self) -> Response {
        match self {
            RecipeError::NotFound(id) => {
                log::warn!("recipe fetch failed: {}", id);
                (StatusCode::NOT_FOUND, "Recipe not found").into_response()
            }
            RecipeError::MissingTitle => {
                log::warn!("recipe add rejected: missing title");
                (StatusCode::BAD_REQUEST, "Recipe title is required").into_response()
            }
            RecipeError::InvalidId(id) => {
                log::warn!("recipe add rejected: invalid id {:?}", id);
                (StatusCode::BAD_REQUEST, "Recipe title is not a valid name").into_response()
            }
            e => {
                log::error!("request failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "500 Internal Server Error").into_response()
            }
        }
    }
}
