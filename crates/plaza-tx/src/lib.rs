//! Order submission and the keeper's transaction history

pub mod error;
pub mod history;
pub mod submit;

pub use error::TxError;
pub use history::{TxHistory, TxKind, TxRecord};
pub use submit::{submit_mint, submit_redemption};
