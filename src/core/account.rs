use crate::core::currency::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a treasury account.
///
/// Accounts are named after the rail and currency they sit on,
/// e.g. `"Mpesa_KES_1"` or `"Bank_USD_2"`.
///
/// # Examples
///
/// ```
/// use treasury_engine::core::account::AccountId;
///
/// let mpesa = AccountId::new("Mpesa_KES_1");
/// let bank = AccountId::new("Bank_USD_1");
/// assert_ne!(mpesa, bank);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this account ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A single-currency account held in the ledger.
///
/// The identifier and currency are fixed at opening. The balance is only
/// changed through [`AccountLedger`](crate::core::ledger::AccountLedger),
/// which never lets it go below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    currency: CurrencyCode,
    balance: Decimal,
}

impl Account {
    pub(crate) fn new(id: AccountId, currency: CurrencyCode, balance: Decimal) -> Self {
        Self {
            id,
            currency,
            balance,
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn currency(&self) -> CurrencyCode {
        self.currency
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Whether the account can fund a debit of `amount` without overdraft.
    pub fn can_cover(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }

    pub(crate) fn set_balance(&mut self, balance: Decimal) {
        self.balance = balance;
    }
}
