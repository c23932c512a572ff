use axum::extract::FromRequest;

use crate::error::Error;

/// `axum::Json` whose rejections render as `{"error": ...}` with a 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct AppJson<T>(pub T);
