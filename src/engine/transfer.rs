use crate::core::account::AccountId;
use crate::core::currency::{CurrencyCode, FxRateTable};
use crate::core::ledger::{AccountLedger, LedgerError};
use crate::core::transaction::{CompletedTransaction, TransferRequest};
use crate::engine::state::TreasuryState;
use chrono::NaiveDate;
use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a transfer is rejected.
///
/// None of these leave a trace in the ledger or the log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    #[error("cannot transfer to the same account ({0})")]
    SameAccount(AccountId),

    #[error("invalid amount {0}: must be greater than zero")]
    InvalidAmount(Decimal),

    #[error("please use present or future dates only ({execute_on} is before {today})")]
    PastDate {
        execute_on: NaiveDate,
        today: NaiveDate,
    },

    #[error("no FX rate for {from} -> {to}")]
    NoFxRoute { from: CurrencyCode, to: CurrencyCode },

    #[error("insufficient funds in {account}: required {required}, available {available}")]
    InsufficientFunds {
        account: AccountId,
        required: Decimal,
        available: Decimal,
    },

    #[error("ledger rejected commit: {0}")]
    Ledger(#[from] LedgerError),
}

impl TransferError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            TransferError::AccountNotFound(_) => "account_not_found",
            TransferError::SameAccount(_) => "same_account",
            TransferError::InvalidAmount(_) => "invalid_amount",
            TransferError::PastDate { .. } => "past_date",
            TransferError::NoFxRoute { .. } => "no_fx_route",
            TransferError::InsufficientFunds { .. } => "insufficient_funds",
            TransferError::Ledger(_) => "ledger",
        }
    }
}

/// What [`TransferEngine::execute`] did with a valid request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransferOutcome {
    /// Committed to the ledger and recorded in the log.
    Completed(CompletedTransaction),
    /// Dated in the future; nothing was checked beyond the request itself.
    /// The caller is expected to hand it to the scheduler.
    Deferred { execute_on: NaiveDate },
}

/// Debit/credit plan produced once every check has passed.
struct Quote {
    from_currency: CurrencyCode,
    to_currency: CurrencyCode,
    converted_amount: Decimal,
}

/// Validates and commits single transfers.
///
/// # Validation order
///
/// The first failing check wins:
///
/// 1. both accounts exist
/// 2. source and destination differ
/// 3. amount is positive
/// 4. `execute_on`, if set, is not in the past
/// 5. `execute_on` in the future defers the request (no further checks)
/// 6. an FX route exists when currencies differ
/// 7. the source balance covers `amount`
///
/// Only then are the debit and credit applied, together, and the
/// [`CompletedTransaction`] prepended to the log.
pub struct TransferEngine;

impl TransferEngine {
    /// Handle an interactive transfer request as of `today`.
    pub fn execute(
        state: &mut TreasuryState,
        rates: &FxRateTable,
        request: &TransferRequest,
        today: NaiveDate,
    ) -> Result<TransferOutcome, TransferError> {
        Self::validate(state.ledger(), request)?;

        if let Some(execute_on) = request.execute_on {
            if execute_on < today {
                return Err(TransferError::PastDate { execute_on, today });
            }
            if execute_on > today {
                debug!(
                    "deferring {} -> {} ({}) to {}",
                    request.from, request.to, request.amount, execute_on
                );
                return Ok(TransferOutcome::Deferred { execute_on });
            }
        }

        Self::commit(state, rates, request, today).map(TransferOutcome::Completed)
    }

    /// Commit path for a transfer that is already due.
    ///
    /// Skips the date checks of [`TransferEngine::execute`]; everything else
    /// is re-validated against the current ledger and rate table.
    pub fn settle(
        state: &mut TreasuryState,
        rates: &FxRateTable,
        request: &TransferRequest,
        today: NaiveDate,
    ) -> Result<CompletedTransaction, TransferError> {
        Self::validate(state.ledger(), request)?;
        Self::commit(state, rates, request, today)
    }

    /// Converted amount `request` would credit, without touching any state.
    pub fn preview(
        ledger: &AccountLedger,
        rates: &FxRateTable,
        request: &TransferRequest,
    ) -> Result<Decimal, TransferError> {
        Self::validate(ledger, request)?;
        Self::quote(ledger, rates, request).map(|q| q.converted_amount)
    }

    fn validate(ledger: &AccountLedger, request: &TransferRequest) -> Result<(), TransferError> {
        for id in [&request.from, &request.to] {
            if !ledger.contains(id) {
                return Err(TransferError::AccountNotFound(id.clone()));
            }
        }
        if request.from == request.to {
            return Err(TransferError::SameAccount(request.from.clone()));
        }
        if request.amount <= Decimal::ZERO {
            return Err(TransferError::InvalidAmount(request.amount));
        }
        Ok(())
    }

    fn quote(
        ledger: &AccountLedger,
        rates: &FxRateTable,
        request: &TransferRequest,
    ) -> Result<Quote, TransferError> {
        let (from, to) = match (ledger.get(&request.from), ledger.get(&request.to)) {
            (Some(from), Some(to)) => (from, to),
            (None, _) => return Err(TransferError::AccountNotFound(request.from.clone())),
            (_, None) => return Err(TransferError::AccountNotFound(request.to.clone())),
        };
        let (from_currency, to_currency) = (from.currency(), to.currency());

        let converted_amount = if from_currency == to_currency {
            request.amount
        } else {
            let rate = rates
                .rate(from_currency, to_currency)
                .ok_or(TransferError::NoFxRoute {
                    from: from_currency,
                    to: to_currency,
                })?;
            request
                .amount
                .checked_mul(rate)
                .ok_or(TransferError::InvalidAmount(request.amount))?
        };

        if !from.can_cover(request.amount) {
            return Err(TransferError::InsufficientFunds {
                account: from.id().clone(),
                required: request.amount,
                available: from.balance(),
            });
        }

        Ok(Quote {
            from_currency,
            to_currency,
            converted_amount,
        })
    }

    fn commit(
        state: &mut TreasuryState,
        rates: &FxRateTable,
        request: &TransferRequest,
        today: NaiveDate,
    ) -> Result<CompletedTransaction, TransferError> {
        let quote = Self::quote(state.ledger(), rates, request)?;

        let (ledger, log) = state.parts_mut();
        ledger.apply_transfer(
            &request.from,
            &request.to,
            request.amount,
            quote.converted_amount,
        )?;

        let tx = CompletedTransaction::new(
            request.from.clone(),
            request.to.clone(),
            request.amount,
            quote.converted_amount,
            quote.from_currency,
            quote.to_currency,
            request.note.clone(),
            request.execute_on.unwrap_or(today),
        );
        info!(
            "committed {}: {} {} {} -> {} {} {}",
            tx.id(),
            tx.from(),
            tx.amount(),
            tx.from_currency(),
            tx.to(),
            tx.converted_amount(),
            tx.to_currency()
        );
        log.record(tx.clone());
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 10).unwrap()
    }

    fn rates() -> FxRateTable {
        let mut rates = FxRateTable::new();
        rates
            .set_rate(CurrencyCode::Kes, CurrencyCode::Usd, dec!(0.0068))
            .unwrap();
        rates
    }

    fn state(accounts: &[(&str, CurrencyCode, Decimal)]) -> TreasuryState {
        let mut ledger = AccountLedger::new();
        for (id, currency, balance) in accounts {
            ledger
                .open_account(AccountId::new(*id), *currency, *balance)
                .unwrap();
        }
        TreasuryState::new(ledger)
    }

    fn request(from: &str, to: &str, amount: Decimal) -> TransferRequest {
        TransferRequest::new(AccountId::new(from), AccountId::new(to), amount)
    }

    #[test]
    fn test_same_currency_transfer() {
        let mut state = state(&[
            ("X", CurrencyCode::Usd, dec!(100)),
            ("Y", CurrencyCode::Usd, Decimal::ZERO),
        ]);
        let outcome =
            TransferEngine::execute(&mut state, &rates(), &request("X", "Y", dec!(40)), today())
                .unwrap();

        let TransferOutcome::Completed(tx) = outcome else {
            panic!("expected completed transfer");
        };
        assert_eq!(tx.converted_amount(), dec!(40));
        assert_eq!(tx.date(), today());
        assert_eq!(state.ledger().balance(&AccountId::new("X")), Some(dec!(60)));
        assert_eq!(state.ledger().balance(&AccountId::new("Y")), Some(dec!(40)));
        assert_eq!(state.log().len(), 1);
    }

    #[test]
    fn test_cross_currency_transfer() {
        let mut state = state(&[
            ("X", CurrencyCode::Kes, dec!(100)),
            ("Y", CurrencyCode::Usd, Decimal::ZERO),
        ]);
        let err =
            TransferEngine::execute(&mut state, &rates(), &request("X", "Y", dec!(1000)), today())
                .unwrap_err();
        assert_eq!(err.kind(), "insufficient_funds");

        TransferEngine::execute(&mut state, &rates(), &request("X", "Y", dec!(50)), today())
            .unwrap();
        assert_eq!(state.ledger().balance(&AccountId::new("X")), Some(dec!(50)));
        assert_eq!(state.ledger().balance(&AccountId::new("Y")), Some(dec!(0.34)));
    }

    #[test]
    fn test_missing_account_checked_before_everything() {
        let mut state = state(&[("X", CurrencyCode::Usd, dec!(100))]);
        // same id and zero amount as well, but existence wins
        let err =
            TransferEngine::execute(&mut state, &rates(), &request("Q", "Q", Decimal::ZERO), today())
                .unwrap_err();
        assert_eq!(err, TransferError::AccountNotFound(AccountId::new("Q")));

        let err =
            TransferEngine::execute(&mut state, &rates(), &request("X", "Z", dec!(1)), today())
                .unwrap_err();
        assert_eq!(err, TransferError::AccountNotFound(AccountId::new("Z")));
    }

    #[test]
    fn test_same_account_before_amount() {
        let mut state = state(&[("X", CurrencyCode::Usd, dec!(100))]);
        let err =
            TransferEngine::execute(&mut state, &rates(), &request("X", "X", dec!(-5)), today())
                .unwrap_err();
        assert_eq!(err, TransferError::SameAccount(AccountId::new("X")));
    }

    #[test]
    fn test_non_positive_amount() {
        let mut state = state(&[
            ("X", CurrencyCode::Usd, dec!(100)),
            ("Y", CurrencyCode::Usd, Decimal::ZERO),
        ]);
        for amount in [Decimal::ZERO, dec!(-1)] {
            let err =
                TransferEngine::execute(&mut state, &rates(), &request("X", "Y", amount), today())
                    .unwrap_err();
            assert_eq!(err, TransferError::InvalidAmount(amount));
        }
    }

    #[test]
    fn test_past_date_rejected() {
        let mut state = state(&[
            ("X", CurrencyCode::Usd, dec!(100)),
            ("Y", CurrencyCode::Usd, Decimal::ZERO),
        ]);
        let yesterday = today().pred_opt().unwrap();
        let req = request("X", "Y", dec!(1)).with_execute_on(yesterday);
        let err = TransferEngine::execute(&mut state, &rates(), &req, today()).unwrap_err();
        assert_eq!(
            err,
            TransferError::PastDate {
                execute_on: yesterday,
                today: today()
            }
        );
        assert!(state.log().is_empty());
    }

    #[test]
    fn test_future_date_deferred_without_funds_or_fx_check() {
        let mut state = state(&[
            ("X", CurrencyCode::Usd, dec!(1)),
            ("Y", CurrencyCode::Ngn, Decimal::ZERO),
        ]);
        let tomorrow = today().succ_opt().unwrap();
        // no USD -> NGN route and not enough funds, still deferred
        let req = request("X", "Y", dec!(500)).with_execute_on(tomorrow);
        let outcome = TransferEngine::execute(&mut state, &rates(), &req, today()).unwrap();

        assert_eq!(outcome, TransferOutcome::Deferred { execute_on: tomorrow });
        assert_eq!(state.ledger().balance(&AccountId::new("X")), Some(dec!(1)));
        assert!(state.log().is_empty());
    }

    #[test]
    fn test_today_dated_executes_with_that_date() {
        let mut state = state(&[
            ("X", CurrencyCode::Usd, dec!(100)),
            ("Y", CurrencyCode::Usd, Decimal::ZERO),
        ]);
        let req = request("X", "Y", dec!(1)).with_execute_on(today());
        let outcome = TransferEngine::execute(&mut state, &rates(), &req, today()).unwrap();
        assert!(matches!(outcome, TransferOutcome::Completed(ref tx) if tx.date() == today()));
    }

    #[test]
    fn test_no_fx_route_never_falls_back() {
        let mut state = state(&[
            ("X", CurrencyCode::Usd, dec!(100)),
            ("Y", CurrencyCode::Kes, Decimal::ZERO),
        ]);
        // only KES -> USD is configured
        let err =
            TransferEngine::execute(&mut state, &rates(), &request("X", "Y", dec!(1)), today())
                .unwrap_err();
        assert_eq!(
            err,
            TransferError::NoFxRoute {
                from: CurrencyCode::Usd,
                to: CurrencyCode::Kes
            }
        );
        assert_eq!(state.ledger().balance(&AccountId::new("X")), Some(dec!(100)));
    }

    #[test]
    fn test_fx_route_checked_before_funds() {
        let mut state = state(&[
            ("X", CurrencyCode::Usd, dec!(1)),
            ("Y", CurrencyCode::Kes, Decimal::ZERO),
        ]);
        let err =
            TransferEngine::execute(&mut state, &rates(), &request("X", "Y", dec!(5)), today())
                .unwrap_err();
        assert_eq!(err.kind(), "no_fx_route");
    }

    #[test]
    fn test_settle_ignores_dates() {
        let mut state = state(&[
            ("X", CurrencyCode::Usd, dec!(100)),
            ("Y", CurrencyCode::Usd, Decimal::ZERO),
        ]);
        let due = today().pred_opt().unwrap();
        let req = request("X", "Y", dec!(10)).with_execute_on(due);
        let tx = TransferEngine::settle(&mut state, &rates(), &req, today()).unwrap();
        assert_eq!(tx.date(), due);
        assert_eq!(state.ledger().balance(&AccountId::new("Y")), Some(dec!(10)));
    }

    #[test]
    fn test_preview_does_not_mutate() {
        let state = state(&[
            ("X", CurrencyCode::Kes, dec!(1000)),
            ("Y", CurrencyCode::Usd, Decimal::ZERO),
        ]);
        let converted =
            TransferEngine::preview(state.ledger(), &rates(), &request("X", "Y", dec!(1000)))
                .unwrap();
        assert_eq!(converted, dec!(6.8));
        assert_eq!(state.ledger().balance(&AccountId::new("X")), Some(dec!(1000)));
    }

    #[test]
    fn test_error_messages() {
        let err = TransferError::SameAccount(AccountId::new("X"));
        assert_eq!(err.to_string(), "cannot transfer to the same account (X)");
        let err = TransferError::NoFxRoute {
            from: CurrencyCode::Usd,
            to: CurrencyCode::Kes,
        };
        assert_eq!(err.to_string(), "no FX rate for USD -> KES");
    }
}
