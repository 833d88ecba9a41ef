use plaza_core::{PoolLimits, SnapshotReads, TokenKind};

use crate::error::ChainError;
use crate::orders::{Asset, CreateOrder, RedeemOrder, TxReceipt};

/// Read side of the transport. Individual fields of `read_vault` may come
/// back empty; a failed oracle read is reported as `oracle_price: None`.
pub trait SnapshotSource {
  fn read_vault(&self) -> Result<SnapshotReads, ChainError>;

  /// The pool's own quote for `kind`
  fn market_price(&self, kind: TokenKind) -> Result<u128, ChainError>;

  fn pool_limits(&self) -> Result<PoolLimits, ChainError>;

  /// Tokens the pool would create for `deposit` reserve, when it can simulate
  fn simulate_create(&self, kind: TokenKind, deposit: u128) -> Result<Option<u128>, ChainError>;

  fn balance(&self, asset: Asset) -> Result<u128, ChainError>;
}

/// Write side of the transport
pub trait TransactionSink {
  fn submit_create(&mut self, order: &CreateOrder) -> Result<TxReceipt, ChainError>;

  fn submit_redeem(&mut self, order: &RedeemOrder) -> Result<TxReceipt, ChainError>;
}
