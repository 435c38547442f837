use crate::core::account::AccountId;
use crate::core::currency::CurrencyCode;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A request to move `amount` (in the source account's currency) from one
/// account to another.
///
/// Requests are plain data: nothing is checked until the request reaches the
/// [`TransferEngine`](crate::engine::transfer::TransferEngine). Without an
/// `execute_on` date the transfer is immediate.
///
/// # Examples
///
/// ```
/// use treasury_engine::core::account::AccountId;
/// use treasury_engine::core::transaction::TransferRequest;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let request = TransferRequest::new(
///     AccountId::new("Bank_USD_1"),
///     AccountId::new("Bank_NGN_1"),
///     dec!(250),
/// )
/// .with_note("supplier float")
/// .with_execute_on(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
///
/// assert_eq!(request.amount, dec!(250));
/// assert!(request.execute_on.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Decimal,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub execute_on: Option<NaiveDate>,
}

impl TransferRequest {
    pub fn new(from: AccountId, to: AccountId, amount: Decimal) -> Self {
        Self {
            from,
            to,
            amount,
            note: String::new(),
            execute_on: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_execute_on(mut self, date: NaiveDate) -> Self {
        self.execute_on = Some(date);
        self
    }
}

/// Identifier of a completed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Record of a transfer that has been committed to the ledger.
///
/// Immutable once created. `amount` is in `from_currency`;
/// `converted_amount` is what `to` was credited, in `to_currency`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTransaction {
    id: TransactionId,
    from: AccountId,
    to: AccountId,
    amount: Decimal,
    converted_amount: Decimal,
    from_currency: CurrencyCode,
    to_currency: CurrencyCode,
    note: String,
    date: NaiveDate,
}

impl CompletedTransaction {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        from: AccountId,
        to: AccountId,
        amount: Decimal,
        converted_amount: Decimal,
        from_currency: CurrencyCode,
        to_currency: CurrencyCode,
        note: String,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            from,
            to,
            amount,
            converted_amount,
            from_currency,
            to_currency,
            note,
            date,
        }
    }

    // --- Accessors ---

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn from(&self) -> &AccountId {
        &self.from
    }

    pub fn to(&self) -> &AccountId {
        &self.to
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn converted_amount(&self) -> Decimal {
        self.converted_amount
    }

    pub fn from_currency(&self) -> CurrencyCode {
        self.from_currency
    }

    pub fn to_currency(&self) -> CurrencyCode {
        self.to_currency
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Whether a currency conversion took place.
    pub fn is_cross_currency(&self) -> bool {
        self.from_currency != self.to_currency
    }

    /// Effective rate applied (`converted_amount / amount`).
    pub fn effective_rate(&self) -> Decimal {
        self.converted_amount / self.amount
    }

    /// Whether the transaction touches `account` on either side.
    pub fn involves_account(&self, account: &AccountId) -> bool {
        &self.from == account || &self.to == account
    }

    /// Whether either leg is denominated in `currency`.
    pub fn involves_currency(&self, currency: CurrencyCode) -> bool {
        self.from_currency == currency || self.to_currency == currency
    }
}
