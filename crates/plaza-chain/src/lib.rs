//! Capability interfaces between the engine and the chain transport
//!
//! The engine only ever sees a `SnapshotSource` and a `TransactionSink`.
//! `FixtureSource` and `PaperSink` back them with a JSON file and an
//! in-memory ledger for dry runs and tests.

pub mod error;
pub mod fixture;
pub mod orders;
pub mod paper;
pub mod source;

pub use error::ChainError;
pub use fixture::{FixtureSource, FixtureState};
pub use orders::{Asset, Balances, CreateOrder, CreateRates, MarketPrices, RedeemOrder, TxReceipt};
pub use paper::PaperSink;
pub use source::{SnapshotSource, TransactionSink};
