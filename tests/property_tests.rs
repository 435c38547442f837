use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use treasury_engine::config::TreasuryConfig;
use treasury_engine::core::account::AccountId;
use treasury_engine::core::currency::{CurrencyCode, FxRateTable};
use treasury_engine::core::journal::TransactionFilter;
use treasury_engine::core::ledger::AccountLedger;
use treasury_engine::core::transaction::TransferRequest;
use treasury_engine::engine::transfer::TransferError;
use treasury_engine::reporting::totals::CurrencyTotals;
use treasury_engine::simulation::treasury::{SubmitOutcome, Treasury};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
}

fn seeded() -> Treasury {
    Treasury::from_config(&TreasuryConfig::default()).unwrap()
}

/// Pick one of the seeded account identifiers.
fn arb_account() -> impl Strategy<Value = AccountId> {
    let ids: Vec<AccountId> = TreasuryConfig::default()
        .accounts
        .into_iter()
        .map(|a| a.id)
        .collect();
    prop::sample::select(ids)
}

fn arb_currency() -> impl Strategy<Value = CurrencyCode> {
    prop::sample::select(CurrencyCode::ALL.to_vec())
}

/// Positive amount with two decimal places (0.01 to 1,000,000.00).
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// An immediate request between two distinct seeded accounts.
fn arb_request() -> impl Strategy<Value = TransferRequest> {
    (arb_account(), arb_account(), arb_amount()).prop_filter_map(
        "from must differ from to",
        |(from, to, amount)| {
            if from == to {
                None
            } else {
                Some(TransferRequest::new(from, to, amount))
            }
        },
    )
}

fn arb_requests() -> impl Strategy<Value = Vec<TransferRequest>> {
    prop::collection::vec(arb_request(), 1..60)
}

/// A request due 1..=10 days after `start()`.
fn arb_scheduled_request() -> impl Strategy<Value = TransferRequest> {
    (arb_request(), 1i64..=10).prop_map(|(request, offset)| {
        request.with_execute_on(start() + Duration::days(offset))
    })
}

proptest! {
    // ===================================================================
    // No balance is ever negative after a committed operation.
    // ===================================================================
    #[test]
    fn no_overdraft(requests in arb_requests()) {
        let mut treasury = seeded();
        for request in requests {
            let _ = treasury.submit(request, start());
            for account in treasury.accounts() {
                prop_assert!(
                    account.balance() >= Decimal::ZERO,
                    "{} went negative: {}",
                    account.id(),
                    account.balance()
                );
            }
        }
    }

    // ===================================================================
    // Same-currency transfers move exactly the amount and keep the total.
    // ===================================================================
    #[test]
    fn same_currency_conserves_value(amount in arb_amount()) {
        let mut treasury = seeded();
        let from = AccountId::new("Bank_NGN_1");
        let to = AccountId::new("Wallet_NGN_3");
        let before_total = treasury.totals().get(CurrencyCode::Ngn);
        let before_from = treasury.account(&from).unwrap().balance();
        let before_to = treasury.account(&to).unwrap().balance();

        match treasury.submit(TransferRequest::new(from.clone(), to.clone(), amount), start()) {
            Ok(SubmitOutcome::Completed(tx)) => {
                prop_assert_eq!(tx.converted_amount(), amount);
                prop_assert_eq!(before_from - treasury.account(&from).unwrap().balance(), amount);
                prop_assert_eq!(treasury.account(&to).unwrap().balance() - before_to, amount);
                prop_assert_eq!(treasury.totals().get(CurrencyCode::Ngn), before_total);
            }
            Ok(SubmitOutcome::Scheduled(_)) => prop_assert!(false, "immediate request was scheduled"),
            Err(e) => {
                prop_assert!(matches!(e, TransferError::InsufficientFunds { .. }), "expected InsufficientFunds, got {:?}", e);
                prop_assert!(amount > before_from);
            }
        }
    }

    // ===================================================================
    // Conversion uses exactly the configured directed rate, and a missing
    // route is never served by inverting the opposite one.
    // ===================================================================
    #[test]
    fn conversion_uses_directed_rate_only(
        from_currency in arb_currency(),
        to_currency in arb_currency(),
        reverse_rate in (1i64..100_000i64).prop_map(|r| Decimal::new(r, 4)),
        forward_rate in prop::option::of((1i64..100_000i64).prop_map(|r| Decimal::new(r, 4))),
        amount in (1i64..1_000_000i64).prop_map(|c| Decimal::new(c, 2)),
    ) {
        prop_assume!(from_currency != to_currency);

        let mut ledger = AccountLedger::new();
        ledger.open_account(AccountId::new("src"), from_currency, Decimal::from(100_000)).unwrap();
        ledger.open_account(AccountId::new("dst"), to_currency, Decimal::ZERO).unwrap();
        let mut rates = FxRateTable::new();
        rates.set_rate(to_currency, from_currency, reverse_rate).unwrap();
        if let Some(rate) = forward_rate {
            rates.set_rate(from_currency, to_currency, rate).unwrap();
        }
        let mut treasury = Treasury::new(ledger, rates);

        let result = treasury.submit(
            TransferRequest::new(AccountId::new("src"), AccountId::new("dst"), amount),
            start(),
        );
        match forward_rate {
            Some(rate) => {
                let Ok(SubmitOutcome::Completed(tx)) = result else {
                    return Err(TestCaseError::fail("expected a completed transfer"));
                };
                prop_assert_eq!(tx.converted_amount(), amount * rate);
                prop_assert_eq!(
                    treasury.account(&AccountId::new("dst")).unwrap().balance(),
                    amount * rate
                );
            }
            None => {
                prop_assert_eq!(
                    result.unwrap_err(),
                    TransferError::NoFxRoute { from: from_currency, to: to_currency }
                );
                prop_assert_eq!(
                    treasury.account(&AccountId::new("src")).unwrap().balance(),
                    Decimal::from(100_000)
                );
            }
        }
    }

    // ===================================================================
    // Totals are a pure function of the ledger.
    // ===================================================================
    #[test]
    fn totals_match_ledger(requests in arb_requests()) {
        let mut treasury = seeded();
        for request in requests {
            let _ = treasury.submit(request, start());
        }

        let first = CurrencyTotals::from_ledger(treasury.ledger());
        let second = CurrencyTotals::from_ledger(treasury.ledger());
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(treasury.totals(), &first);

        for currency in treasury.currencies() {
            let sum: Decimal = treasury
                .accounts()
                .iter()
                .filter(|a| a.currency() == currency)
                .map(|a| a.balance())
                .sum();
            prop_assert_eq!(first.get(currency), Some(sum));
        }
    }

    // ===================================================================
    // Each scheduled entry is attempted exactly once, on its due date and
    // never before.
    // ===================================================================
    #[test]
    fn scheduled_entries_run_once_on_due_date(
        requests in prop::collection::vec(arb_scheduled_request(), 1..40),
    ) {
        let mut treasury = seeded();
        let scheduled = requests.len();
        for request in requests {
            let outcome = treasury.submit(request, start());
            prop_assert!(matches!(outcome, Ok(SubmitOutcome::Scheduled(_))));
        }

        let mut attempted = 0;
        for offset in 0..=10 {
            let today = start() + Duration::days(offset);
            let report = treasury.tick(today);

            for tx in &report.completed {
                prop_assert_eq!(tx.date(), today);
            }
            for failed in &report.failed {
                prop_assert_eq!(failed.entry.execute_on, today);
                prop_assert_eq!(failed.attempted_on, today);
            }
            prop_assert!(treasury.pending().iter().all(|e| e.execute_on > today));
            attempted += report.attempted();
        }

        prop_assert_eq!(attempted, scheduled);
        prop_assert!(treasury.pending().is_empty());
        prop_assert_eq!(
            treasury.log().len() + treasury.failed_scheduled().len(),
            scheduled
        );
    }

    // ===================================================================
    // Filtering keeps newest-first order and drops nothing that matches.
    // ===================================================================
    #[test]
    fn filtering_preserves_log_order(
        requests in arb_requests(),
        account in prop::option::of(arb_account()),
        currency in prop::option::of(arb_currency()),
    ) {
        let mut treasury = seeded();
        for request in requests {
            let _ = treasury.submit(request, start());
        }

        let filter = TransactionFilter { account, currency };
        let filtered: Vec<_> = treasury.transactions(&filter).map(|tx| tx.id()).collect();
        let expected: Vec<_> = treasury
            .log()
            .iter()
            .filter(|tx| filter.matches(tx))
            .map(|tx| tx.id())
            .collect();
        prop_assert_eq!(filtered, expected);
    }
}
