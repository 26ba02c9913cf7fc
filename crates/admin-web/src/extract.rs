//! Request extractors.

use axum::extract::FromRequest;

use crate::error::AdminError;

/// `axum::Json`, but a malformed or incomplete body is answered with an
/// error notice instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AdminError))]
pub struct ApiJson<T>(pub T);
