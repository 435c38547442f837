use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use treasury_engine::config::TreasuryConfig;
use treasury_engine::core::account::AccountId;
use treasury_engine::core::currency::CurrencyCode;
use treasury_engine::core::ledger::AccountLedger;
use treasury_engine::reporting::totals::CurrencyTotals;
use treasury_engine::simulation::treasury::Treasury;
use treasury_engine::simulation::workload::{generate_transfers, WorkloadConfig};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

fn seed_ids() -> Vec<AccountId> {
    TreasuryConfig::default()
        .accounts
        .into_iter()
        .map(|a| a.id)
        .collect()
}

fn bench_immediate_1000_transfers(c: &mut Criterion) {
    let config = WorkloadConfig {
        transfers: 1000,
        horizon_days: 0,
        ..Default::default()
    };
    let requests = generate_transfers(&config, &seed_ids(), start());
    let treasury = Treasury::from_config(&TreasuryConfig::default()).unwrap();

    c.bench_function("immediate_1000_transfers", |b| {
        b.iter(|| {
            let mut treasury = treasury.clone();
            for request in &requests {
                let _ = treasury.submit(black_box(request.clone()), start());
            }
            treasury
        })
    });
}

fn bench_scheduled_1000_transfers(c: &mut Criterion) {
    let config = WorkloadConfig {
        transfers: 1000,
        horizon_days: 10,
        ..Default::default()
    };
    let requests = generate_transfers(&config, &seed_ids(), start());
    let treasury = Treasury::from_config(&TreasuryConfig::default()).unwrap();

    c.bench_function("scheduled_1000_transfers_10_days", |b| {
        b.iter(|| {
            let mut treasury = treasury.clone();
            for request in &requests {
                let _ = treasury.submit(black_box(request.clone()), start());
            }
            for offset in 1..=config.horizon_days {
                treasury.tick(start() + Duration::days(offset));
            }
            treasury
        })
    });
}

fn bench_totals_10000_accounts(c: &mut Criterion) {
    let mut ledger = AccountLedger::new();
    for i in 0..10_000u32 {
        let currency = CurrencyCode::ALL[i as usize % CurrencyCode::ALL.len()];
        ledger
            .open_account(AccountId::new(format!("ACC-{}", i)), currency, i.into())
            .unwrap();
    }

    c.bench_function("totals_10000_accounts", |b| {
        b.iter(|| CurrencyTotals::from_ledger(black_box(&ledger)))
    });
}

criterion_group!(
    benches,
    bench_immediate_1000_transfers,
    bench_scheduled_1000_transfers,
    bench_totals_10000_accounts
);
criterion_main!(benches);
