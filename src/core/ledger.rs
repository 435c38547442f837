use crate::core::account::{Account, AccountId};
use crate::core::currency::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by the account ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("account {0} already exists")]
    DuplicateAccount(AccountId),
    #[error("account {id} cannot open with negative balance {balance}")]
    NegativeOpeningBalance { id: AccountId, balance: Decimal },
    #[error("account {0} not found")]
    AccountNotFound(AccountId),
    #[error("debit of {amount} would overdraw {id} (balance {balance})")]
    Overdraft {
        id: AccountId,
        amount: Decimal,
        balance: Decimal,
    },
    #[error("balance overflow on account {0}")]
    Overflow(AccountId),
    #[error("total {0} balance would overflow")]
    TotalOverflow(CurrencyCode),
}

/// The set of treasury accounts and their balances.
///
/// Accounts are kept in opening order. Balances are mutated in exactly one
/// place, [`AccountLedger::apply_transfer`], which applies a debit and a
/// credit together or not at all. The sum of balances in each currency
/// always fits in a [`Decimal`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Account>", into = "Vec<Account>")]
pub struct AccountLedger {
    accounts: Vec<Account>,
    index: HashMap<AccountId, usize>,
}

impl TryFrom<Vec<Account>> for AccountLedger {
    type Error = LedgerError;

    /// Reopen every account in order, with the same checks as
    /// [`AccountLedger::open_account`].
    fn try_from(accounts: Vec<Account>) -> Result<Self, Self::Error> {
        let mut ledger = Self::new();
        for account in accounts {
            ledger.open_account(account.id().clone(), account.currency(), account.balance())?;
        }
        Ok(ledger)
    }
}

impl From<AccountLedger> for Vec<Account> {
    fn from(ledger: AccountLedger) -> Self {
        ledger.accounts
    }
}

impl AccountLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new account with a starting balance.
    pub fn open_account(
        &mut self,
        id: AccountId,
        currency: CurrencyCode,
        balance: Decimal,
    ) -> Result<&Account, LedgerError> {
        if self.index.contains_key(&id) {
            return Err(LedgerError::DuplicateAccount(id));
        }
        if balance < Decimal::ZERO {
            return Err(LedgerError::NegativeOpeningBalance { id, balance });
        }
        self.total_with(currency, |account| account.balance())
            .and_then(|total| total.checked_add(balance))
            .ok_or(LedgerError::TotalOverflow(currency))?;
        let slot = self.accounts.len();
        self.index.insert(id.clone(), slot);
        self.accounts.push(Account::new(id, currency, balance));
        Ok(&self.accounts[slot])
    }

    pub fn get(&self, id: &AccountId) -> Option<&Account> {
        self.index.get(id).map(|&i| &self.accounts[i])
    }

    pub fn contains(&self, id: &AccountId) -> bool {
        self.index.contains_key(id)
    }

    /// Balance of an account, if it exists.
    pub fn balance(&self, id: &AccountId) -> Option<Decimal> {
        self.get(id).map(Account::balance)
    }

    /// All accounts in opening order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Distinct currencies held, in currency order.
    pub fn currencies(&self) -> Vec<CurrencyCode> {
        let mut currencies: Vec<CurrencyCode> =
            self.accounts.iter().map(Account::currency).collect();
        currencies.sort();
        currencies.dedup();
        currencies
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Debit `from` by `debit` and credit `to` by `credit` as one unit.
    ///
    /// Both new balances are computed before either is written, so an error
    /// leaves the ledger untouched.
    pub(crate) fn apply_transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        debit: Decimal,
        credit: Decimal,
    ) -> Result<(), LedgerError> {
        let from_idx = *self
            .index
            .get(from)
            .ok_or_else(|| LedgerError::AccountNotFound(from.clone()))?;
        let to_idx = *self
            .index
            .get(to)
            .ok_or_else(|| LedgerError::AccountNotFound(to.clone()))?;

        let from_balance = self.accounts[from_idx].balance();
        if from_balance < debit {
            return Err(LedgerError::Overdraft {
                id: from.clone(),
                amount: debit,
                balance: from_balance,
            });
        }
        let new_from = from_balance
            .checked_sub(debit)
            .ok_or_else(|| LedgerError::Overflow(from.clone()))?;
        // from == to nets to a pure credit of (credit - debit)
        let to_base = if from_idx == to_idx {
            new_from
        } else {
            self.accounts[to_idx].balance()
        };
        let new_to = to_base
            .checked_add(credit)
            .ok_or_else(|| LedgerError::Overflow(to.clone()))?;

        let to_currency = self.accounts[to_idx].currency();
        self.total_with(to_currency, |account| {
            if account.id() == to {
                new_to
            } else if account.id() == from {
                new_from
            } else {
                account.balance()
            }
        })
        .ok_or(LedgerError::TotalOverflow(to_currency))?;

        self.accounts[from_idx].set_balance(new_from);
        self.accounts[to_idx].set_balance(new_to);
        Ok(())
    }

    /// Checked sum over accounts in `currency`, reading each balance through
    /// `balance_of`. `None` on overflow.
    fn total_with(
        &self,
        currency: CurrencyCode,
        balance_of: impl Fn(&Account) -> Decimal,
    ) -> Option<Decimal> {
        self.accounts
            .iter()
            .filter(|a| a.currency() == currency)
            .try_fold(Decimal::ZERO, |sum, a| sum.checked_add(balance_of(a)))
    }
}
