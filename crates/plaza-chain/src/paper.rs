//! Sink that accepts every order and records it, for dry runs and tests

use crate::error::ChainError;
use crate::orders::{CreateOrder, RedeemOrder, TxReceipt};
use crate::source::TransactionSink;

#[derive(Debug, Default)]
pub struct PaperSink {
  pub creates: Vec<CreateOrder>,
  pub redeems: Vec<RedeemOrder>,
  /// When set, the next submission fails with this reason
  pub fail_next: Option<String>,
}

impl PaperSink {
  pub fn new() -> Self {
    Self::default()
  }

  fn next_receipt(&mut self) -> Result<TxReceipt, ChainError> {
    if let Some(reason) = self.fail_next.take() {
      return Err(ChainError::Rejected(reason));
    }
    let sequence = self.creates.len() + self.redeems.len();
    Ok(TxReceipt {
      hash: format!("paper-{:06}", sequence),
      gas_used: None,
    })
  }
}

impl TransactionSink for PaperSink {
  fn submit_create(&mut self, order: &CreateOrder) -> Result<TxReceipt, ChainError> {
    let receipt = self.next_receipt()?;
    self.creates.push(*order);
    Ok(receipt)
  }

  fn submit_redeem(&mut self, order: &RedeemOrder) -> Result<TxReceipt, ChainError> {
    let receipt = self.next_receipt()?;
    self.redeems.push(*order);
    Ok(receipt)
  }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_core::TokenKind;

    fn order() -> RedeemOrder {
        RedeemOrder {
            token_kind: TokenKind::Bond,
            amount: 1,
            min_amount_out: 1,
            deadline: 1,
        }
    }

    #[test]
    fn test_sequential_hashes() {
        let mut sink = PaperSink::new();
        assert_eq!(sink.submit_redeem(&order()).unwrap().hash, "paper-000000");
        assert_eq!(sink.submit_redeem(&order()).unwrap().hash, "paper-000001");
        assert_eq!(sink.redeems.len(), 2);
    }

    #[test]
    fn test_fail_next() {
        let mut sink = PaperSink::new();
        sink.fail_next = Some("reverted".into());
        assert!(matches!(sink.submit_redeem(&order()), Err(ChainError::Rejected(_))));
        assert!(sink.redeems.is_empty());
        assert!(sink.submit_redeem(&order()).is_ok());
    }
}
