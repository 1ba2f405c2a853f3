//! Pool configuration
//!
//! Static parameters of a pool instance: the token pair, the fee schedule,
//! and the first-deposit share lock. Configuration is validated before a
//! pool is constructed, so the engine never operates on degenerate
//! parameters.

use serde::{Deserialize, Serialize};

use crate::identifiers::{AccountId, TokenId};
use rockpool_amm::SwapFee;

/// Complete configuration for one pool instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Token identity of side A
    pub token_a: TokenId,
    /// Token identity of side B
    pub token_b: TokenId,
    /// Input-side swap fee
    pub fee: SwapFee,
    /// Shares locked permanently on the pool's first deposit
    pub minimum_shares: u64,
    /// Account that holds the locked shares; excluded from redemption
    pub sentinel: AccountId,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            token_a: TokenId::new(1),
            token_b: TokenId::new(2),
            fee: SwapFee::default(),     // 0.30%
            minimum_shares: 1_000,       // standard first-deposit lock
            sentinel: AccountId::new(0), // reserved holder for locked shares
        }
    }
}

impl PoolConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Override with environment variables if present
        if let Ok(fee_bps) = std::env::var("POOL_FEE_BPS") {
            if let Ok(value) = fee_bps.parse::<u64>() {
                config.fee = SwapFee::from_bps(value);
            }
        }

        if let Ok(minimum) = std::env::var("POOL_MINIMUM_SHARES") {
            if let Ok(value) = minimum.parse::<u64>() {
                config.minimum_shares = value;
            }
        }

        if let Ok(token_a) = std::env::var("POOL_TOKEN_A") {
            if let Ok(value) = token_a.parse::<u64>() {
                config.token_a = TokenId::new(value);
            }
        }

        if let Ok(token_b) = std::env::var("POOL_TOKEN_B") {
            if let Ok(value) = token_b.parse::<u64>() {
                config.token_b = TokenId::new(value);
            }
        }

        config
    }

    /// Save configuration to a JSON file
    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.token_a == self.token_b {
            anyhow::bail!("token_a and token_b must be distinct");
        }

        if self.minimum_shares == 0 {
            anyhow::bail!("minimum_shares must be positive");
        }

        self.fee.validate()?;

        Ok(())
    }

    /// Whether `token` is a side of this pool
    pub fn contains_token(&self, token: TokenId) -> bool {
        token == self.token_a || token == self.token_b
    }
}
