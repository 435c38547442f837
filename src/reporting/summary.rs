use crate::core::account::Account;
use crate::core::journal::TransactionFilter;
use crate::core::transaction::CompletedTransaction;
use crate::engine::scheduler::{FailedScheduledTransfer, PendingScheduledTransfer};
use crate::reporting::totals::CurrencyTotals;
use crate::simulation::treasury::Treasury;
use chrono::NaiveDate;
use serde::Serialize;

/// Point-in-time snapshot of everything a treasury exposes to readers.
#[derive(Debug, Clone, Serialize)]
pub struct TreasurySummary {
    pub as_of: Option<NaiveDate>,
    pub accounts: Vec<Account>,
    pub totals: CurrencyTotals,
    pub transactions: Vec<CompletedTransaction>,
    pub pending: Vec<PendingScheduledTransfer>,
    pub failed_scheduled: Vec<FailedScheduledTransfer>,
}

impl TreasurySummary {
    /// Capture `treasury`, keeping only log entries that match `filter`.
    pub fn capture(treasury: &Treasury, filter: &TransactionFilter) -> Self {
        Self {
            as_of: treasury.last_seen(),
            accounts: treasury.accounts().to_vec(),
            totals: treasury.totals().clone(),
            transactions: treasury.transactions(filter).cloned().collect(),
            pending: treasury.pending().to_vec(),
            failed_scheduled: treasury.failed_scheduled().to_vec(),
        }
    }
}

impl std::fmt::Display for TreasurySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_of {
            Some(date) => writeln!(f, "=== Treasury as of {} ===", date)?,
            None => writeln!(f, "=== Treasury ===")?,
        }

        writeln!(f, "\n{:<16} {:>16} {:>8}", "Account", "Balance", "Currency")?;
        for account in &self.accounts {
            writeln!(
                f,
                "{:<16} {:>16.2} {:>8}",
                account.id().as_str(),
                account.balance(),
                account.currency()
            )?;
        }

        writeln!(f)?;
        write!(f, "{}", self.totals)?;

        if !self.transactions.is_empty() {
            writeln!(f, "\n=== Transaction Log ===")?;
            for tx in &self.transactions {
                writeln!(
                    f,
                    "  {}  {} ({}) -> {} ({})  {} -> {:.2}  {}",
                    tx.date(),
                    tx.from(),
                    tx.from_currency(),
                    tx.to(),
                    tx.to_currency(),
                    tx.amount(),
                    tx.converted_amount(),
                    tx.note()
                )?;
            }
        }

        writeln!(f, "\n=== Scheduled Transfers ===")?;
        if self.pending.is_empty() {
            writeln!(f, "  No scheduled transfers")?;
        }
        for entry in &self.pending {
            writeln!(
                f,
                "  {}  {}  {} -> {}  {}  {}",
                entry.id,
                entry.execute_on,
                entry.request.from,
                entry.request.to,
                entry.request.amount,
                entry.request.note
            )?;
        }

        if !self.failed_scheduled.is_empty() {
            writeln!(f, "\n=== Failed Scheduled Transfers ===")?;
            for failed in &self.failed_scheduled {
                writeln!(
                    f,
                    "  {}  due {}  attempted {}  {} -> {}  {}: {}",
                    failed.entry.id,
                    failed.entry.execute_on,
                    failed.attempted_on,
                    failed.entry.request.from,
                    failed.entry.request.to,
                    failed.entry.request.amount,
                    failed.reason
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TreasuryConfig;
    use crate::core::account::AccountId;
    use crate::core::transaction::TransferRequest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_renders_sections() {
        let mut treasury = Treasury::from_config(&TreasuryConfig::default()).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        treasury
            .submit(
                TransferRequest::new(
                    AccountId::new("Bank_USD_1"),
                    AccountId::new("Bank_USD_2"),
                    dec!(100),
                )
                .with_note("rebalance"),
                today,
            )
            .unwrap();

        let summary = TreasurySummary::capture(&treasury, &TransactionFilter::all());
        let text = summary.to_string();
        assert!(text.contains("Treasury as of 2026-02-01"));
        assert!(text.contains("Bank_USD_1"));
        assert!(text.contains("19900.00"));
        assert!(text.contains("rebalance"));
        assert!(text.contains("No scheduled transfers"));
        assert_eq!(summary.accounts.len(), 10);
    }
}
