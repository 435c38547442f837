use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Currency an account is denominated in.
///
/// A closed set of tags compared by identity. Parsing accepts the
/// three-letter code in any case.
///
/// # Examples
///
/// ```
/// use treasury_engine::core::currency::CurrencyCode;
///
/// let kes: CurrencyCode = "kes".parse().unwrap();
/// assert_eq!(kes, CurrencyCode::Kes);
/// assert_eq!(kes.to_string(), "KES");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    /// Kenyan shilling.
    Kes,
    /// US dollar.
    Usd,
    /// Nigerian naira.
    Ngn,
}

impl CurrencyCode {
    pub const ALL: [CurrencyCode; 3] = [CurrencyCode::Kes, CurrencyCode::Usd, CurrencyCode::Ngn];

    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Kes => "KES",
            CurrencyCode::Usd => "USD",
            CurrencyCode::Ngn => "NGN",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the supported currency codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown currency code '{0}'")]
pub struct ParseCurrencyError(pub String);

impl FromStr for CurrencyCode {
    type Err = ParseCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        CurrencyCode::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(code))
            .ok_or_else(|| ParseCurrencyError(code.to_string()))
    }
}

/// Errors arising from FX rate operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FxError {
    #[error("no FX rate available for {from} -> {to}")]
    RateNotFound {
        from: CurrencyCode,
        to: CurrencyCode,
    },
    #[error("FX rate must be positive, got {rate} for {from} -> {to}")]
    InvalidRate {
        from: CurrencyCode,
        to: CurrencyCode,
        rate: Decimal,
    },
}

/// Directed FX rate table.
///
/// A rate `r` stored for `(from, to)` means one unit of `from` buys `r`
/// units of `to`. Nothing is inferred: setting `KES -> USD` does not make
/// `USD -> KES` available, and a missing pair is
/// a legitimate "conversion unsupported" state.
///
/// # Examples
///
/// ```
/// use treasury_engine::core::currency::{CurrencyCode, FxRateTable};
/// use rust_decimal_macros::dec;
///
/// let mut rates = FxRateTable::new();
/// rates.set_rate(CurrencyCode::Kes, CurrencyCode::Usd, dec!(0.0068)).unwrap();
///
/// assert_eq!(rates.rate(CurrencyCode::Kes, CurrencyCode::Usd), Some(dec!(0.0068)));
/// assert_eq!(rates.rate(CurrencyCode::Usd, CurrencyCode::Kes), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FxRateTable {
    /// Direct rates: (from, to) -> rate.
    rates: HashMap<(CurrencyCode, CurrencyCode), Decimal>,
}

impl FxRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a direct exchange rate: 1 unit of `from` = `rate` units of `to`.
    pub fn set_rate(
        &mut self,
        from: CurrencyCode,
        to: CurrencyCode,
        rate: Decimal,
    ) -> Result<(), FxError> {
        if rate <= Decimal::ZERO {
            return Err(FxError::InvalidRate { from, to, rate });
        }
        self.rates.insert((from, to), rate);
        Ok(())
    }

    /// Look up the rate for a configured route.
    ///
    /// Same-currency pairs are not special-cased here; callers that need
    /// identity conversion use [`FxRateTable::convert`].
    pub fn rate(&self, from: CurrencyCode, to: CurrencyCode) -> Option<Decimal> {
        self.rates.get(&(from, to)).copied()
    }

    /// Convert an amount from one currency to another.
    ///
    /// Identity when `from == to`; otherwise requires a table entry.
    pub fn convert(
        &self,
        amount: Decimal,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<Decimal, FxError> {
        if from == to {
            return Ok(amount);
        }
        let rate = self
            .rate(from, to)
            .ok_or(FxError::RateNotFound { from, to })?;
        Ok(amount * rate)
    }

    /// Every configured route, sorted by (from, to).
    pub fn routes(&self) -> Vec<(CurrencyCode, CurrencyCode, Decimal)> {
        let mut routes: Vec<_> = self
            .rates
            .iter()
            .map(|(&(from, to), &rate)| (from, to, rate))
            .collect();
        routes.sort_by_key(|&(from, to, _)| (from, to));
        routes
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
