use crate::core::account::Account;
use crate::core::currency::CurrencyCode;
use crate::core::ledger::AccountLedger;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sum of balances per currency across the ledger.
///
/// Always derived from a full pass over the accounts; there is no
/// incremental update path. A currency appears only if at least one account
/// holds it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyTotals {
    totals: BTreeMap<CurrencyCode, Decimal>,
}

impl CurrencyTotals {
    /// Aggregate balances of `ledger`.
    pub fn from_ledger(ledger: &AccountLedger) -> Self {
        Self::from_accounts(ledger.accounts())
    }

    pub fn from_accounts<'a>(accounts: impl IntoIterator<Item = &'a Account>) -> Self {
        let mut totals: BTreeMap<CurrencyCode, Decimal> = BTreeMap::new();
        for account in accounts {
            // An AccountLedger keeps every currency total representable, so
            // this only saturates for accounts gathered from elsewhere.
            let total = totals.entry(account.currency()).or_insert(Decimal::ZERO);
            *total = total.saturating_add(account.balance());
        }
        Self { totals }
    }

    /// Total for `currency`, if any account holds it.
    pub fn get(&self, currency: CurrencyCode) -> Option<Decimal> {
        self.totals.get(&currency).copied()
    }

    /// (currency, total) pairs in currency order.
    pub fn iter(&self) -> impl Iterator<Item = (CurrencyCode, Decimal)> + '_ {
        self.totals.iter().map(|(&c, &v)| (c, v))
    }

    pub fn currencies(&self) -> impl Iterator<Item = CurrencyCode> + '_ {
        self.totals.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

impl std::fmt::Display for CurrencyTotals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Total Balances ===")?;
        for (currency, total) in self.iter() {
            writeln!(f, "  {}: {:.2}", currency, total)?;
        }
        Ok(())
    }
}
