//! # treasury-engine
//!
//! Multi-currency treasury movement simulator.
//!
//! Moves funds between accounts held in different currencies, converting
//! through a fixed directed FX table, executing future-dated transfers when
//! their date arrives, and keeping per-currency totals and a newest-first
//! transaction log.
//!
//! ## Architecture
//!
//! - **core**: Currencies and FX rates, accounts, the ledger, transfer requests, the transaction log
//! - **engine**: Transfer validation and atomic commit, the scheduler
//! - **reporting**: Per-currency totals and treasury snapshots
//! - **simulation**: Clock, the `Treasury` facade, random workloads
//! - **config**: Seed accounts and FX routes, JSON loading

pub mod config;
pub mod core;
pub mod engine;
pub mod reporting;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::TreasuryConfig;
    pub use crate::core::account::{Account, AccountId};
    pub use crate::core::currency::{CurrencyCode, FxRateTable};
    pub use crate::core::journal::{TransactionFilter, TransactionLog};
    pub use crate::core::ledger::AccountLedger;
    pub use crate::core::transaction::{CompletedTransaction, TransferRequest};
    pub use crate::engine::scheduler::{PendingScheduledTransfer, Scheduler, TickReport};
    pub use crate::engine::transfer::{TransferEngine, TransferError, TransferOutcome};
    pub use crate::reporting::totals::CurrencyTotals;
    pub use crate::simulation::clock::{Clock, FixedClock};
    pub use crate::simulation::treasury::{SubmitOutcome, Treasury};
}
