use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{AuthUser, ServerState, router, run, run_with_listener, spawn_with_listener};
pub use token::{Claims, TokenSigner};

mod coins;
mod info;
mod server;
mod shop;
mod token;
mod users;

pub mod types {
    pub mod auth {
        pub use api_types::auth::{AuthRequest, AuthResponse};
    }

    pub mod coin {
        pub use api_types::coin::SendCoinRequest;
    }

    pub mod info {
        pub use api_types::info::{
            CoinHistory, InfoResponse, InventoryItem, ReceivedEntry, SentEntry,
        };
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
    Internal(String),
}

//TODO: Find a better solution
#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        EngineError::UserNotFound(_) | EngineError::ItemNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Conflict(_) => StatusCode::CONFLICT,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InsufficientFunds(_) | EngineError::InvalidAmount(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::Internal(err) => {
                tracing::error!("internal error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
