//! Off-chain collateral pricing and redemption engine for the bond/leverage
//! reserve pool. Every computation is integer fixed-point and reproduces the
//! price tiers the pool enforces on-chain.

pub mod bounds;
pub mod collateral;
pub mod constants;
pub mod engine;
pub mod error;
pub mod health;
pub mod math;
pub mod pricing;
pub mod redemption;
pub mod slippage;
pub mod state;
pub mod units;

pub use bounds::AmountBounds;
pub use collateral::{CollateralLevel, CollateralState};
pub use engine::{DecisionStage, Engine, MintDecision, MintRequest, RedemptionRequest};
pub use error::{EngineError, Result};
pub use health::{assess_health, HealthWarning, VaultHealth, VaultStatus};
pub use pricing::PriceQuote;
pub use redemption::RedemptionDecision;
pub use slippage::SlippageTolerance;
pub use state::{PoolLimits, SnapshotReads, TokenKind, VaultSnapshot};
