use crate::core::journal::TransactionLog;
use crate::core::ledger::AccountLedger;
use serde::{Deserialize, Serialize};

/// Ledger and transaction log, owned together.
///
/// Readers get shared references. The only writer is
/// [`TransferEngine`](crate::engine::transfer::TransferEngine), which commits
/// a balance change and its log entry in the same step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreasuryState {
    ledger: AccountLedger,
    log: TransactionLog,
}

impl TreasuryState {
    pub fn new(ledger: AccountLedger) -> Self {
        Self {
            ledger,
            log: TransactionLog::new(),
        }
    }

    pub fn ledger(&self) -> &AccountLedger {
        &self.ledger
    }

    pub fn log(&self) -> &TransactionLog {
        &self.log
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut AccountLedger, &mut TransactionLog) {
        (&mut self.ledger, &mut self.log)
    }
}
