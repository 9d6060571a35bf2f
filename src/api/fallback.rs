use axum::http::{StatusCode, Uri};

use crate::info;

pub async fn not_found(uri: Uri) -> StatusCode {
    info!("Got request for: {}", uri);
    StatusCode::NOT_FOUND
}
