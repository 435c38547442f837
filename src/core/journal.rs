use crate::core::account::AccountId;
use crate::core::currency::CurrencyCode;
use crate::core::transaction::CompletedTransaction;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Optional account and currency constraints for reading the log.
///
/// An empty filter matches everything. When both are set, an entry must
/// satisfy both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub account: Option<AccountId>,
    pub currency: Option<CurrencyCode>,
}

impl TransactionFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn account(mut self, account: AccountId) -> Self {
        self.account = Some(account);
        self
    }

    pub fn currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn matches(&self, tx: &CompletedTransaction) -> bool {
        self.account
            .as_ref()
            .map_or(true, |account| tx.involves_account(account))
            && self
                .currency
                .map_or(true, |currency| tx.involves_currency(currency))
    }
}

/// Append-only history of completed transactions, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionLog {
    entries: VecDeque<CompletedTransaction>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transaction at the head of the log.
    pub fn record(&mut self, tx: CompletedTransaction) {
        self.entries.push_front(tx);
    }

    /// Entries matching `filter`, most recent first.
    pub fn query<'a>(
        &'a self,
        filter: &'a TransactionFilter,
    ) -> impl Iterator<Item = &'a CompletedTransaction> + 'a {
        self.entries.iter().filter(move |tx| filter.matches(tx))
    }

    /// All entries, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &CompletedTransaction> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&CompletedTransaction> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
