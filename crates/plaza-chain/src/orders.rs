use serde::{Deserialize, Serialize};

use plaza_core::TokenKind;

/// Balances the keeper can spend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Asset {
  Reserve,
  Bond,
  Leverage,
}

impl From<TokenKind> for Asset {
  fn from(kind: TokenKind) -> Self {
    match kind {
      TokenKind::Bond => Asset::Bond,
      TokenKind::Leverage => Asset::Leverage,
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balances {
  pub reserve: u128,
  pub bond: u128,
  pub leverage: u128,
}

impl Balances {
  pub fn of(&self, asset: Asset) -> u128 {
    match asset {
      Asset::Reserve => self.reserve,
      Asset::Bond => self.bond,
      Asset::Leverage => self.leverage,
    }
  }
}

/// Pool quote per whole token, quote units (6 decimals)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPrices {
  pub bond: u128,
  pub leverage: u128,
}

impl MarketPrices {
  pub fn of(&self, kind: TokenKind) -> u128 {
    match kind {
      TokenKind::Bond => self.bond,
      TokenKind::Leverage => self.leverage,
    }
  }
}

/// Tokens created per whole reserve deposited (18 decimals)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRates {
  pub bond: u128,
  pub leverage: u128,
}

impl CreateRates {
  pub fn of(&self, kind: TokenKind) -> u128 {
    match kind {
      TokenKind::Bond => self.bond,
      TokenKind::Leverage => self.leverage,
    }
  }
}

/// Deposit reserve, receive at least `min_amount_out` tokens before `deadline`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrder {
  pub token_kind: TokenKind,
  pub deposit_amount: u128,
  pub min_amount_out: u128,
  pub deadline: u64,
}

/// Burn `amount` tokens, receive at least `min_amount_out` reserve before `deadline`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedeemOrder {
  pub token_kind: TokenKind,
  pub amount: u128,
  pub min_amount_out: u128,
  pub deadline: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
  pub hash: String,
  pub gas_used: Option<u64>,
}
