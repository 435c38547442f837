//! Random transfer workloads for stress testing the engine.
//!
//! Requests are drawn without regard to balances or FX routes, so a
//! realistic share of them is rejected. With `include_past_dated` some
//! requests fall the day before `start` and must be refused outright.

use crate::core::account::AccountId;
use crate::core::transaction::TransferRequest;
use chrono::{Duration, NaiveDate};
use rand::Rng;
use rust_decimal::Decimal;

/// Upper bound on [`WorkloadConfig::horizon_days`]; longer horizons are
/// clamped to it.
pub const MAX_HORIZON_DAYS: i64 = 3650;

/// Configuration for generating a random sequence of transfer requests.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    /// Number of requests to generate.
    pub transfers: usize,
    /// Latest execution offset in days from the start date, at most
    /// [`MAX_HORIZON_DAYS`]. Zero makes every request immediate.
    pub horizon_days: i64,
    /// Minimum transfer amount.
    pub min_amount: Decimal,
    /// Maximum transfer amount.
    pub max_amount: Decimal,
    /// Allow execution dates one day before the start date.
    pub include_past_dated: bool,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            transfers: 50,
            horizon_days: 5,
            min_amount: Decimal::from(1),
            max_amount: Decimal::from(25_000),
            include_past_dated: false,
        }
    }
}

/// Generate a random transfer workload over `accounts`, dated from `start`.
///
/// Requests dated `start` carry no explicit date. Returns nothing when fewer
/// than two accounts are given.
pub fn generate_transfers(
    config: &WorkloadConfig,
    accounts: &[AccountId],
    start: NaiveDate,
) -> Vec<TransferRequest> {
    if accounts.len() < 2 {
        return Vec::new();
    }
    let mut rng = rand::thread_rng();

    let min_f64: f64 = config.min_amount.to_string().parse().unwrap_or(1.0);
    let max_f64: f64 = config.max_amount.to_string().parse().unwrap_or(25_000.0);
    let lowest_offset = if config.include_past_dated { -1 } else { 0 };
    let horizon = config.horizon_days.clamp(0, MAX_HORIZON_DAYS);

    let mut requests = Vec::with_capacity(config.transfers);
    for i in 0..config.transfers {
        let from_idx = rng.gen_range(0..accounts.len());
        let mut to_idx = rng.gen_range(0..accounts.len());
        while to_idx == from_idx {
            to_idx = rng.gen_range(0..accounts.len());
        }

        let amount_f64 = if max_f64 > min_f64 {
            rng.gen_range(min_f64..max_f64)
        } else {
            min_f64
        };
        let amount = Decimal::from_f64_retain(amount_f64)
            .unwrap_or(config.min_amount)
            .round_dp(2)
            .max(Decimal::new(1, 2));

        let mut request = TransferRequest::new(
            accounts[from_idx].clone(),
            accounts[to_idx].clone(),
            amount,
        )
        .with_note(format!("generated #{}", i + 1));

        let offset = rng.gen_range(lowest_offset..=horizon);
        if offset != 0 {
            if let Some(date) =
                Duration::try_days(offset).and_then(|delta| start.checked_add_signed(delta))
            {
                request = request.with_execute_on(date);
            }
        }
        requests.push(request);
    }
    requests
}
