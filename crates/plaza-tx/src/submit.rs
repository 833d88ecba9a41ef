//! Turns accepted decisions into orders and records every attempt

use tracing::{error, info};

use plaza_chain::{CreateOrder, RedeemOrder, TransactionSink, TxReceipt};
use plaza_core::{MintDecision, RedemptionDecision};

use crate::error::TxError;
use crate::history::{TxHistory, TxKind};

pub fn submit_mint<K: TransactionSink>(
  sink: &mut K,
  decision: &MintDecision,
  history: &mut TxHistory,
) -> Result<TxReceipt, TxError> {
  ensure_accepted(decision.accepted, decision.reject_reason.as_ref())?;

  let kind = TxKind::create(decision.token_kind);
  let order = CreateOrder {
    token_kind: decision.token_kind,
    deposit_amount: decision.deposit_amount,
    min_amount_out: decision.min_amount_out,
    deadline: decision.deadline,
  };
  info!(
    kind = %kind,
    deposit = order.deposit_amount,
    min_out = order.min_amount_out,
    deadline = order.deadline,
    "submitting create"
  );
  record(history, kind, sink.submit_create(&order))
}

/// The order carries the reserve-denominated minimum, which is what the pool
/// checks on redemption.
pub fn submit_redemption<K: TransactionSink>(
  sink: &mut K,
  decision: &RedemptionDecision,
  history: &mut TxHistory,
) -> Result<TxReceipt, TxError> {
  ensure_accepted(decision.accepted, decision.reject_reason.as_ref())?;

  let kind = TxKind::redeem(decision.token_kind);
  let order = RedeemOrder {
    token_kind: decision.token_kind,
    amount: decision.amount,
    min_amount_out: decision.min_reserve_out,
    deadline: decision.deadline,
  };
  info!(
    kind = %kind,
    amount = order.amount,
    min_reserve_out = order.min_amount_out,
    deadline = order.deadline,
    "submitting redemption"
  );
  record(history, kind, sink.submit_redeem(&order))
}

fn ensure_accepted(accepted: bool, reason: Option<&plaza_core::EngineError>) -> Result<(), TxError> {
  if accepted {
    return Ok(());
  }
  Err(match reason {
    Some(reason) => TxError::NotAccepted(reason.clone()),
    None => TxError::Unaccepted,
  })
}

fn record(
  history: &mut TxHistory,
  kind: TxKind,
  outcome: Result<TxReceipt, plaza_chain::ChainError>,
) -> Result<TxReceipt, TxError> {
  match outcome {
    Ok(receipt) => {
      info!(kind = %kind, hash = %receipt.hash, "transaction submitted");
      history.record_success(kind, receipt.hash.clone());
      Ok(receipt)
    }
    Err(err) => {
      error!(kind = %kind, error = %err, "transaction failed");
      history.record_failure(kind, err.to_string());
      Err(err.into())
    }
  }
}
