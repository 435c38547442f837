//! Treasury initialization parameters.
//!
//! Accounts and FX routes are read from JSON. Without a file the built-in
//! seed set is used: ten accounts across KES, USD and NGN and six directed
//! rates.
//!
//! ```json
//! {
//!   "accounts": [
//!     { "id": "Mpesa_KES_1", "currency": "KES", "balance": "50000" }
//!   ],
//!   "fx_rates": [
//!     { "from": "KES", "to": "USD", "rate": "0.0068" }
//!   ]
//! }
//! ```

use crate::core::account::AccountId;
use crate::core::currency::{CurrencyCode, FxError, FxRateTable};
use crate::core::ledger::{AccountLedger, LedgerError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or applying a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid account: {0}")]
    Ledger(#[from] LedgerError),
    #[error("invalid FX rate: {0}")]
    Fx(#[from] FxError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfig {
    pub id: AccountId,
    pub currency: CurrencyCode,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FxRateConfig {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasuryConfig {
    pub accounts: Vec<AccountConfig>,
    #[serde(default)]
    pub fx_rates: Vec<FxRateConfig>,
}

impl Default for TreasuryConfig {
    fn default() -> Self {
        use CurrencyCode::{Kes, Ngn, Usd};

        let accounts = [
            ("Mpesa_KES_1", Kes, dec!(50000)),
            ("Mpesa_KES_2", Kes, dec!(30000)),
            ("Bank_KES_3", Kes, dec!(100000)),
            ("Bank_USD_1", Usd, dec!(20000)),
            ("Bank_USD_2", Usd, dec!(15000)),
            ("Wallet_USD_3", Usd, dec!(10000)),
            ("Bank_NGN_1", Ngn, dec!(800000)),
            ("Bank_NGN_2", Ngn, dec!(500000)),
            ("Wallet_NGN_3", Ngn, dec!(300000)),
            ("Reserve_NGN_4", Ngn, dec!(200000)),
        ]
        .into_iter()
        .map(|(id, currency, balance)| AccountConfig {
            id: AccountId::new(id),
            currency,
            balance,
        })
        .collect();

        let fx_rates = [
            (Kes, Usd, dec!(0.0068)),
            (Kes, Ngn, dec!(5.7)),
            (Usd, Kes, dec!(147.0)),
            (Usd, Ngn, dec!(840.0)),
            (Ngn, Kes, dec!(0.175)),
            (Ngn, Usd, dec!(0.0012)),
        ]
        .into_iter()
        .map(|(from, to, rate)| FxRateConfig { from, to, rate })
        .collect();

        Self { accounts, fx_rates }
    }
}

impl TreasuryConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Open every configured account, in order.
    pub fn build_ledger(&self) -> Result<AccountLedger, ConfigError> {
        let mut ledger = AccountLedger::new();
        for account in &self.accounts {
            ledger.open_account(account.id.clone(), account.currency, account.balance)?;
        }
        Ok(ledger)
    }

    pub fn build_rates(&self) -> Result<FxRateTable, ConfigError> {
        let mut rates = FxRateTable::new();
        for fx in &self.fx_rates {
            rates.set_rate(fx.from, fx.to, fx.rate)?;
        }
        Ok(rates)
    }
}
