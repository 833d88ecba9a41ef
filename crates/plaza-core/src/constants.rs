//! Protocol-wide constants
//! Scales and thresholds mirrored from the reserve pool contract

// PRECISION CONSTANTS
pub const PRECISION: u128 = 1_000_000;                          // ratio scale (1.0 = 1e6)
pub const QUOTE_PRECISION: u128 = 1_000_000;                    // 6 decimals (USDC)
pub const TOKEN_PRECISION: u128 = 1_000_000_000_000_000_000;    // 18 decimals
pub const BPS_PRECISION: u128 = 10_000;                         // 100% = 10000 bps

pub const QUOTE_DECIMALS: u32 = 6;
pub const TOKEN_DECIMALS: u32 = 18;

// PRICE TIERS
pub const BOND_TARGET_PRICE: u128 = 100 * QUOTE_PRECISION;      // 100 USDC par
pub const COLLATERAL_THRESHOLD: u128 = 1_200_000;               // 120%
pub const PARITY_COLLATERAL_LEVEL: u128 = PRECISION;            // 100%

// Share of total value claimable per token when level <= threshold
pub const BOND_CLAIM_SHARE: u128 = 800_000;                     // 80%
pub const LEVERAGE_CLAIM_SHARE: u128 = 200_000;                 // 20%

// TRANSACTION DEFAULTS
pub const DEFAULT_SLIPPAGE_BPS: u64 = 500;                      // 5%
pub const MAX_SLIPPAGE_BPS: u64 = 500;
pub const DEFAULT_DEADLINE_SECS: u64 = 3_600;                   // 1 hour

// KEEPER DEFAULTS
pub const DEFAULT_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_JITTER_MIN_SECS: u64 = 30;
pub const DEFAULT_JITTER_MAX_SECS: u64 = 300;

// Smallest balance worth acting on: 0.01 token
pub const MIN_ELIGIBLE_BALANCE: u128 = TOKEN_PRECISION / 100;
