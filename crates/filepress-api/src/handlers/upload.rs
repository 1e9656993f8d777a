use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::extract_file_field;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

/// `POST /upload`: validate, store, compress, and report sizes.
///
/// A body that is not multipart at all is treated the same as a form
/// without a file part.
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_file"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let upload = match multipart {
        Ok(multipart) => extract_file_field(multipart).await?,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Request body is not multipart");
            None
        }
    };

    let outcome = state.pipeline.ingest(upload).await?;
    Ok(Json(outcome))
}
