//! Date-driven execution of future-dated transfers.
//!
//! Entries wait in the scheduler until a tick's `today` reaches their
//! `execute_on` date. On that tick each due entry gets exactly one attempt
//! through [`TransferEngine::settle`] and leaves the pending set whatever the
//! result. Failures are not errors for the caller: they come back in the
//! [`TickReport`] so the owner can keep an audit trail.

use crate::core::currency::FxRateTable;
use crate::core::transaction::{CompletedTransaction, TransferRequest};
use crate::engine::state::TreasuryState;
use crate::engine::transfer::{TransferEngine, TransferError};
use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a scheduled transfer, increasing in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduledTransferId(u64);

impl ScheduledTransferId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScheduledTransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:06}", self.0)
    }
}

/// A transfer waiting for its execution date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingScheduledTransfer {
    pub id: ScheduledTransferId,
    pub execute_on: NaiveDate,
    pub request: TransferRequest,
}

impl PendingScheduledTransfer {
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.execute_on <= today
    }
}

/// A due entry that could not be settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedScheduledTransfer {
    pub entry: PendingScheduledTransfer,
    #[serde(serialize_with = "serialize_reason")]
    pub reason: TransferError,
    pub attempted_on: NaiveDate,
}

fn serialize_reason<S: serde::Serializer>(
    reason: &TransferError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeStruct;
    let mut s = serializer.serialize_struct("Reason", 2)?;
    s.serialize_field("kind", reason.kind())?;
    s.serialize_field("message", &reason.to_string())?;
    s.end()
}

/// Outcome of one [`Scheduler::tick`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub date: Option<NaiveDate>,
    /// Settled entries, in attempt order.
    pub completed: Vec<CompletedTransaction>,
    /// Entries consumed without settling, in attempt order.
    pub failed: Vec<FailedScheduledTransfer>,
}

impl TickReport {
    /// Number of due entries consumed on this tick.
    pub fn attempted(&self) -> usize {
        self.completed.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempted() == 0
    }
}

/// Holds future-dated transfers until they are due.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: Vec<PendingScheduledTransfer>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a request for execution on `request.execute_on`.
    ///
    /// Requests without a date are treated as due immediately (they will
    /// run on the next tick).
    pub fn schedule(&mut self, request: TransferRequest, today: NaiveDate) -> PendingScheduledTransfer {
        self.next_id += 1;
        let entry = PendingScheduledTransfer {
            id: ScheduledTransferId(self.next_id),
            execute_on: request.execute_on.unwrap_or(today),
            request,
        };
        debug!("scheduled {} for {}", entry.id, entry.execute_on);
        self.pending.push(entry.clone());
        entry
    }

    /// Pending entries in creation order.
    pub fn pending(&self) -> &[PendingScheduledTransfer] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest execution date among pending entries.
    pub fn next_due_date(&self) -> Option<NaiveDate> {
        self.pending.iter().map(|e| e.execute_on).min()
    }

    /// Attempt every entry due on or before `today`, once.
    ///
    /// Due entries are removed before any is attempted, so an entry can never
    /// be seen by two ticks. The most recently scheduled entry is attempted
    /// first; when due entries compete for the same funds the newest wins.
    /// Settled transfers land in the log in attempt order, so the oldest
    /// settled entry ends up at the head.
    pub fn tick(
        &mut self,
        today: NaiveDate,
        state: &mut TreasuryState,
        rates: &FxRateTable,
    ) -> TickReport {
        let (due, not_due): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|e| e.is_due(today));
        self.pending = not_due;

        let mut report = TickReport {
            date: Some(today),
            ..TickReport::default()
        };
        if due.is_empty() {
            return report;
        }
        debug!(
            "tick {}: {} due, {} still pending",
            today,
            due.len(),
            self.pending.len()
        );

        for entry in due.into_iter().rev() {
            match TransferEngine::settle(state, rates, &entry.request, today) {
                Ok(tx) => report.completed.push(tx),
                Err(reason) => {
                    warn!(
                        "scheduled transfer {} ({} -> {}, {}) dropped on {}: {}",
                        entry.id,
                        entry.request.from,
                        entry.request.to,
                        entry.request.amount,
                        today,
                        reason
                    );
                    report.failed.push(FailedScheduledTransfer {
                        entry,
                        reason,
                        attempted_on: today,
                    });
                }
            }
        }

        info!(
            "tick {}: {} settled, {} failed",
            today,
            report.completed.len(),
            report.failed.len()
        );
        report
    }
}
