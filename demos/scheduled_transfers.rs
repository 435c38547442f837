//! Future-dated transfers driven by a fixed clock.
//!
//! Queues transfers over several days, drains one source account before
//! its scheduled payment falls due, then walks the clock forward and prints
//! what each tick settled or dropped.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use treasury_engine::config::TreasuryConfig;
use treasury_engine::core::account::AccountId;
use treasury_engine::core::journal::TransactionFilter;
use treasury_engine::core::transaction::TransferRequest;
use treasury_engine::reporting::summary::TreasurySummary;
use treasury_engine::simulation::clock::{Clock, FixedClock};
use treasury_engine::simulation::treasury::Treasury;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  treasury-engine: Scheduled Transfers    ║");
    println!("╚══════════════════════════════════════════╝\n");

    let mut clock = FixedClock::new(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
    let mut treasury = Treasury::from_config(&TreasuryConfig::default()).unwrap();

    let day = |d| NaiveDate::from_ymd_opt(2026, 1, d).unwrap();
    let plan = [
        ("Bank_NGN_1", "Bank_KES_3", dec!(100000), day(6), "KES float top-up"),
        ("Bank_USD_2", "Wallet_NGN_3", dec!(250), day(7), "payroll"),
        ("Wallet_USD_3", "Bank_USD_1", dec!(8000), day(8), "sweep"),
        ("Mpesa_KES_2", "Bank_USD_2", dec!(5000), day(8), "fx purchase"),
    ];

    println!("━━━ Queued on {} ━━━\n", clock.today());
    for (from, to, amount, execute_on, note) in plan {
        let request = TransferRequest::new(AccountId::new(from), AccountId::new(to), amount)
            .with_note(note)
            .with_execute_on(execute_on);
        match treasury.submit(request, clock.today()) {
            Ok(outcome) => println!("  {}", outcome_label(&outcome)),
            Err(e) => println!("  ✗ {}", e),
        }
    }
    println!();

    // Drain Wallet_USD_3 before its sweep is due.
    treasury
        .submit(
            TransferRequest::new(
                AccountId::new("Wallet_USD_3"),
                AccountId::new("Bank_USD_2"),
                dec!(5000),
            )
            .with_note("urgent settlement"),
            clock.today(),
        )
        .unwrap();

    for _ in 0..4 {
        let today = clock.advance_days(1);
        let report = treasury.tick(today);
        println!("━━━ Tick {} ━━━\n", today);
        if report.is_empty() {
            println!("  nothing due\n");
            continue;
        }
        for tx in &report.completed {
            println!(
                "  ✓ {} -> {}  {} {} -> {:.2} {}  ({})",
                tx.from(),
                tx.to(),
                tx.amount(),
                tx.from_currency(),
                tx.converted_amount(),
                tx.to_currency(),
                tx.note()
            );
        }
        for failed in &report.failed {
            println!("  ✗ {} dropped: {}", failed.entry.id, failed.reason);
        }
        println!();
    }

    println!(
        "{}",
        TreasurySummary::capture(&treasury, &TransactionFilter::all())
    );
}

fn outcome_label(outcome: &treasury_engine::simulation::treasury::SubmitOutcome) -> String {
    use treasury_engine::simulation::treasury::SubmitOutcome;
    match outcome {
        SubmitOutcome::Completed(tx) => format!("completed {}", tx.id()),
        SubmitOutcome::Scheduled(entry) => format!(
            "{} scheduled for {}: {} -> {} {}",
            entry.id, entry.execute_on, entry.request.from, entry.request.to, entry.request.amount
        ),
    }
}
