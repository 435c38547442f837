use crate::config::{ConfigError, TreasuryConfig};
use crate::core::account::{Account, AccountId};
use crate::core::currency::{CurrencyCode, FxRateTable};
use crate::core::journal::{TransactionFilter, TransactionLog};
use crate::core::ledger::AccountLedger;
use crate::core::transaction::{CompletedTransaction, TransferRequest};
use crate::engine::scheduler::{FailedScheduledTransfer, PendingScheduledTransfer, Scheduler, TickReport};
use crate::engine::state::TreasuryState;
use crate::engine::transfer::{TransferEngine, TransferError, TransferOutcome};
use crate::reporting::totals::CurrencyTotals;
use chrono::NaiveDate;
use log::{debug, warn};
use serde::Serialize;

/// Result of a successful [`Treasury::submit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Executed immediately.
    Completed(CompletedTransaction),
    /// Future-dated; queued with the scheduler.
    Scheduled(PendingScheduledTransfer),
}

/// A complete treasury simulation: accounts, FX table, transaction log,
/// scheduled transfers and cached per-currency totals.
///
/// Every operation that depends on the date takes `today` explicitly. The
/// totals are re-derived from the ledger after each commit, never patched.
///
/// The value is `Send`; a multi-threaded host must hold one lock around each
/// call to keep read-validate-commit atomic.
///
/// # Examples
///
/// ```
/// use treasury_engine::config::TreasuryConfig;
/// use treasury_engine::core::account::AccountId;
/// use treasury_engine::core::currency::CurrencyCode;
/// use treasury_engine::core::transaction::TransferRequest;
/// use treasury_engine::simulation::treasury::Treasury;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let mut treasury = Treasury::from_config(&TreasuryConfig::default()).unwrap();
/// let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
///
/// treasury
///     .submit(
///         TransferRequest::new(AccountId::new("Bank_USD_1"), AccountId::new("Bank_NGN_1"), dec!(10)),
///         today,
///     )
///     .unwrap();
///
/// assert_eq!(treasury.totals().get(CurrencyCode::Ngn), Some(dec!(1808400)));
/// ```
#[derive(Debug, Clone)]
pub struct Treasury {
    state: TreasuryState,
    rates: FxRateTable,
    scheduler: Scheduler,
    failed_scheduled: Vec<FailedScheduledTransfer>,
    totals: CurrencyTotals,
    last_seen: Option<NaiveDate>,
}

impl Treasury {
    pub fn new(ledger: AccountLedger, rates: FxRateTable) -> Self {
        let totals = CurrencyTotals::from_ledger(&ledger);
        Self {
            state: TreasuryState::new(ledger),
            rates,
            scheduler: Scheduler::new(),
            failed_scheduled: Vec::new(),
            totals,
            last_seen: None,
        }
    }

    /// Build a treasury from configured accounts and FX routes.
    pub fn from_config(config: &TreasuryConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.build_ledger()?, config.build_rates()?))
    }

    /// Submit a transfer as of `today`.
    ///
    /// Immediate transfers are committed or rejected on the spot.
    /// Future-dated ones are only checked for accounts, distinct endpoints
    /// and amount before being queued.
    pub fn submit(
        &mut self,
        request: TransferRequest,
        today: NaiveDate,
    ) -> Result<SubmitOutcome, TransferError> {
        self.observe(today);
        match TransferEngine::execute(&mut self.state, &self.rates, &request, today) {
            Ok(TransferOutcome::Completed(tx)) => {
                self.refresh_totals();
                Ok(SubmitOutcome::Completed(tx))
            }
            Ok(TransferOutcome::Deferred { .. }) => {
                let entry = self.scheduler.schedule(request, today);
                Ok(SubmitOutcome::Scheduled(entry))
            }
            Err(err) => {
                debug!(
                    "rejected {} -> {} ({}): {}",
                    request.from, request.to, request.amount, err
                );
                Err(err)
            }
        }
    }

    /// Run the scheduler for `today`.
    ///
    /// Failed entries are also appended to [`Treasury::failed_scheduled`].
    pub fn tick(&mut self, today: NaiveDate) -> TickReport {
        self.observe(today);
        let report = self.scheduler.tick(today, &mut self.state, &self.rates);
        if !report.completed.is_empty() {
            self.refresh_totals();
        }
        self.failed_scheduled.extend(report.failed.iter().cloned());
        report
    }

    // --- Read side ---

    pub fn ledger(&self) -> &AccountLedger {
        self.state.ledger()
    }

    pub fn accounts(&self) -> &[Account] {
        self.state.ledger().accounts()
    }

    pub fn account(&self, id: &AccountId) -> Option<&Account> {
        self.state.ledger().get(id)
    }

    /// Distinct currencies held by the ledger.
    pub fn currencies(&self) -> Vec<CurrencyCode> {
        self.state.ledger().currencies()
    }

    pub fn rates(&self) -> &FxRateTable {
        &self.rates
    }

    pub fn totals(&self) -> &CurrencyTotals {
        &self.totals
    }

    pub fn log(&self) -> &TransactionLog {
        self.state.log()
    }

    /// Log entries matching `filter`, most recent first.
    pub fn transactions<'a>(
        &'a self,
        filter: &'a TransactionFilter,
    ) -> impl Iterator<Item = &'a CompletedTransaction> + 'a {
        self.state.log().query(filter)
    }

    pub fn pending(&self) -> &[PendingScheduledTransfer] {
        self.scheduler.pending()
    }

    /// Scheduled transfers that were due but could not be settled.
    pub fn failed_scheduled(&self) -> &[FailedScheduledTransfer] {
        &self.failed_scheduled
    }

    /// Latest date passed to [`Treasury::submit`] or [`Treasury::tick`].
    pub fn last_seen(&self) -> Option<NaiveDate> {
        self.last_seen
    }

    fn observe(&mut self, today: NaiveDate) {
        if let Some(last) = self.last_seen {
            if today < last {
                warn!("clock moved backwards: {} after {}", today, last);
                return;
            }
        }
        self.last_seen = Some(today);
    }

    fn refresh_totals(&mut self) {
        self.totals = CurrencyTotals::from_ledger(self.state.ledger());
    }
}
