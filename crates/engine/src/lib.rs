pub use accounts::Account;
pub use catalog::Catalog;
pub use commands::{PurchaseCmd, TransferCmd};
pub use error::EngineError;
pub use ops::{AccountInfo, Engine, EngineBuilder, InventoryEntry, ReceivedEntry, SentEntry};
pub use transactions::TransactionKind;

mod accounts;
mod catalog;
mod commands;
mod error;
mod ops;
mod purchases;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;
