//! Immediate transfers over the seeded treasury.
//!
//! Shows same-currency and cross-currency movements, the validation
//! failures a caller can hit, and filtered views of the transaction log.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use treasury_engine::config::TreasuryConfig;
use treasury_engine::core::account::AccountId;
use treasury_engine::core::currency::CurrencyCode;
use treasury_engine::core::journal::TransactionFilter;
use treasury_engine::core::transaction::TransferRequest;
use treasury_engine::engine::transfer::TransferEngine;
use treasury_engine::reporting::summary::TreasurySummary;
use treasury_engine::simulation::treasury::{SubmitOutcome, Treasury};

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  treasury-engine: Basic Transfers        ║");
    println!("╚══════════════════════════════════════════╝\n");

    let mut treasury = Treasury::from_config(&TreasuryConfig::default()).unwrap();
    let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();

    println!("{}", treasury.totals());

    // --- Scenario 1: Same currency ---
    println!("━━━ Scenario 1: Same-Currency Transfer ━━━\n");

    let request = TransferRequest::new(
        AccountId::new("Bank_USD_1"),
        AccountId::new("Bank_USD_2"),
        dec!(2500),
    )
    .with_note("rebalance");
    report(treasury.submit(request, today));

    // --- Scenario 2: Cross currency ---
    println!("━━━ Scenario 2: Cross-Currency Transfers ━━━\n");

    let usd_to_ngn = TransferRequest::new(
        AccountId::new("Bank_USD_1"),
        AccountId::new("Bank_NGN_1"),
        dec!(10),
    )
    .with_note("supplier payment");
    let quoted = TransferEngine::preview(treasury.ledger(), treasury.rates(), &usd_to_ngn).unwrap();
    println!("Quote: 10 USD -> {} NGN", quoted);
    report(treasury.submit(usd_to_ngn, today));

    report(treasury.submit(
        TransferRequest::new(
            AccountId::new("Mpesa_KES_1"),
            AccountId::new("Bank_USD_1"),
            dec!(1000),
        ),
        today,
    ));

    // --- Scenario 3: Rejections ---
    println!("━━━ Scenario 3: Rejected Requests ━━━\n");

    let rejected = [
        TransferRequest::new(
            AccountId::new("Bank_KES_3"),
            AccountId::new("Bank_KES_3"),
            dec!(1),
        ),
        TransferRequest::new(
            AccountId::new("Wallet_USD_3"),
            AccountId::new("Bank_USD_1"),
            dec!(1_000_000),
        ),
        TransferRequest::new(
            AccountId::new("Mpesa_KES_2"),
            AccountId::new("Bank_KES_3"),
            dec!(0),
        ),
        TransferRequest::new(
            AccountId::new("Bank_NGN_2"),
            AccountId::new("Bank_KES_3"),
            dec!(50),
        )
        .with_execute_on(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
    ];
    for request in rejected {
        report(treasury.submit(request, today));
    }

    // --- Filtered log ---
    println!("━━━ USD Activity ━━━\n");
    let usd = TransactionFilter::all().currency(CurrencyCode::Usd);
    for tx in treasury.transactions(&usd) {
        println!(
            "  {:<14} -> {:<14} {:>10} {} -> {:>12.2} {}",
            tx.from(),
            tx.to(),
            tx.amount(),
            tx.from_currency(),
            tx.converted_amount(),
            tx.to_currency()
        );
    }
    println!();

    println!(
        "{}",
        TreasurySummary::capture(&treasury, &TransactionFilter::all())
    );
}

fn report(result: Result<SubmitOutcome, treasury_engine::engine::transfer::TransferError>) {
    match result {
        Ok(SubmitOutcome::Completed(tx)) => println!(
            "  ✓ {} {} -> {} {} ({} -> {})\n",
            tx.amount(),
            tx.from_currency(),
            tx.converted_amount(),
            tx.to_currency(),
            tx.from(),
            tx.to()
        ),
        Ok(SubmitOutcome::Scheduled(entry)) => {
            println!("  ⏳ scheduled {} for {}\n", entry.id, entry.execute_on)
        }
        Err(e) => println!("  ✗ {}\n", e),
    }
}
