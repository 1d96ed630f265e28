use rouille::Response;
use serde::Serialize;

use crate::{engine::error::EngineError, upstream::UpstreamError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// upstream refused or could not be reached
    BadGateway(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidTimeWindow(_) => ApiError::BadRequest(err.to_string()),

            EngineError::PlaylistNotFound(_) => ApiError::NotFound(err.to_string()),

            EngineError::UpstreamFailure(UpstreamError::Decode(reason)) => {
                log::error!("undecodable upstream response: {reason}");
                ApiError::Internal("internal server error".into())
            }

            EngineError::UpstreamFailure(_) => ApiError::BadGateway(err.to_string()),

            EngineError::MalformedRecord { .. } => {
                log::error!("{err}");
                ApiError::Internal("internal server error".into())
            }
        }
    }
}

impl ApiError {
    pub fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::NotFound(msg) => (404, msg),
            ApiError::BadRequest(msg) => (400, msg),
            ApiError::BadGateway(msg) => (502, msg),
            ApiError::Internal(msg) => (500, msg),
        };
        Response::json(&ErrorBody { error }).with_status_code(status)
    }
}
