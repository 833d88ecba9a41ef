use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use plaza_core::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxKind {
  CreateBond,
  CreateLeverage,
  RedeemBond,
  RedeemLeverage,
}

impl TxKind {
  pub fn create(kind: TokenKind) -> Self {
    match kind {
      TokenKind::Bond => TxKind::CreateBond,
      TokenKind::Leverage => TxKind::CreateLeverage,
    }
  }

  pub fn redeem(kind: TokenKind) -> Self {
    match kind {
      TokenKind::Bond => TxKind::RedeemBond,
      TokenKind::Leverage => TxKind::RedeemLeverage,
    }
  }
}

impl fmt::Display for TxKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      TxKind::CreateBond => "CREATE_BOND",
      TxKind::CreateLeverage => "CREATE_LEVERAGE",
      TxKind::RedeemBond => "REDEEM_BOND",
      TxKind::RedeemLeverage => "REDEEM_LEVERAGE",
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxRecord {
  pub kind: TxKind,
  pub hash: Option<String>,
  pub success: bool,
  pub timestamp: DateTime<Utc>,
  pub error: Option<String>,
}

/// Append-only log of submission attempts, owned by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TxHistory {
  records: Vec<TxRecord>,
}

impl TxHistory {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn record_success(&mut self, kind: TxKind, hash: String) {
    self.records.push(TxRecord {
      kind,
      hash: Some(hash),
      success: true,
      timestamp: Utc::now(),
      error: None,
    });
  }

  pub fn record_failure(&mut self, kind: TxKind, error: String) {
    self.records.push(TxRecord {
      kind,
      hash: None,
      success: false,
      timestamp: Utc::now(),
      error: Some(error),
    });
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  pub fn records(&self) -> &[TxRecord] {
    &self.records
  }

  /// Up to `n` most recent records, oldest first
  pub fn recent(&self, n: usize) -> &[TxRecord] {
    let start = self.records.len().saturating_sub(n);
    &self.records[start..]
  }

  pub fn failures(&self) -> usize {
    self.records.iter().filter(|record| !record.success).count()
  }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_returns_tail() {
        let mut history = TxHistory::new();
        history.record_success(TxKind::CreateBond, "a".into());
        history.record_failure(TxKind::RedeemBond, "reverted".into());
        history.record_success(TxKind::RedeemLeverage, "c".into());

        let recent = history.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].kind, TxKind::RedeemBond);
        assert!(!recent[0].success);
        assert_eq!(recent[1].hash.as_deref(), Some("c"));
        assert_eq!(history.recent(10).len(), 3);
        assert_eq!(history.failures(), 1);
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(TxKind::create(TokenKind::Leverage).to_string(), "CREATE_LEVERAGE");
        assert_eq!(TxKind::redeem(TokenKind::Bond).to_string(), "REDEEM_BOND");
    }
}
