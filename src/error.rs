use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised while loading a series or evaluating it.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("No data: {0}")]
    NoData(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error("Task failed: {0}")]
    TaskFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

impl AnalysisError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AnalysisError::NoData(_) => StatusCode::NOT_FOUND,
            AnalysisError::InvalidParameter(_)
            | AnalysisError::InvalidSeries(_)
            | AnalysisError::UnknownTool(_)
            | AnalysisError::InvalidArguments(_) => StatusCode::BAD_REQUEST,
            AnalysisError::TaskFailed(_) | AnalysisError::Io(_) | AnalysisError::SerdeJson(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
