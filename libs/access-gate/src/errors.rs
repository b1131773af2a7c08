use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    /// A required pipeline argument was not supplied by the host
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),
}

#[cfg(feature = "axum-ext")]
impl axum::response::IntoResponse for GateError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;
        use axum::response::Json;
        use serde_json::json;

        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
