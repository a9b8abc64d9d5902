//! The module contains the error the engine can throw.
//!
//! Business-rule failures ([`InvalidCredentials`], [`UserNotFound`],
//! [`InsufficientFunds`], [`ItemNotFound`], [`InvalidAmount`], [`Conflict`])
//! are recoverable and carry a user-facing message. [`Database`] wraps a
//! store failure and propagates untouched; the engine never retries it.
//!
//!  [`InvalidCredentials`]: EngineError::InvalidCredentials
//!  [`UserNotFound`]: EngineError::UserNotFound
//!  [`InsufficientFunds`]: EngineError::InsufficientFunds
//!  [`ItemNotFound`]: EngineError::ItemNotFound
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`Conflict`]: EngineError::Conflict
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid credentials!")]
    InvalidCredentials,
    #[error("\"{0}\" user not found!")]
    UserNotFound(String),
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),
    #[error("\"{0}\" item not found!")]
    ItemNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("\"{0}\" already registered!")]
    Conflict(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::UserNotFound(a), Self::UserNotFound(b)) => a == b,
            (Self::InsufficientFunds(a), Self::InsufficientFunds(b)) => a == b,
            (Self::ItemNotFound(a), Self::ItemNotFound(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
