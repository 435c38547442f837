//! treasury-engine CLI
//!
//! Replay treasury movements from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Show the seeded accounts and totals
//! treasury-engine accounts
//!
//! # Replay a script of transfers and date changes
//! treasury-engine run --script day.json --today 2026-01-05
//!
//! # Output as JSON
//! treasury-engine run --script day.json --format json
//!
//! # Generate a random script for testing
//! treasury-engine generate --transfers 40 --horizon 5
//! ```

use chrono::NaiveDate;
use log::info;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::process;
use treasury_engine::config::TreasuryConfig;
use treasury_engine::core::account::AccountId;
use treasury_engine::core::currency::CurrencyCode;
use treasury_engine::core::journal::TransactionFilter;
use treasury_engine::core::transaction::TransferRequest;
use treasury_engine::engine::scheduler::TickReport;
use treasury_engine::reporting::summary::TreasurySummary;
use treasury_engine::simulation::clock::{Clock, FixedClock, SystemClock};
use treasury_engine::simulation::treasury::{SubmitOutcome, Treasury};
use treasury_engine::simulation::workload::{generate_transfers, WorkloadConfig, MAX_HORIZON_DAYS};

fn print_usage() {
    eprintln!(
        r#"treasury-engine — multi-currency treasury movement simulator

USAGE:
    treasury-engine <COMMAND> [OPTIONS]

COMMANDS:
    accounts    Show accounts and per-currency totals
    rates       Show the configured FX routes
    run         Replay a JSON script of transfers and date changes
    generate    Generate a random script (for testing)
    help        Show this message

OPTIONS (accounts, rates, run):
    --config <FILE>     JSON accounts and FX rates (default: built-in seed set)
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (run):
    --script <FILE>     Path to JSON script file
    --today <DATE>      Starting date, YYYY-MM-DD (default: local date)
    --account <ID>      Only show log entries touching this account
    --currency <CODE>   Only show log entries in this currency

OPTIONS (generate):
    --transfers <N>     Number of transfers (default: 50)
    --horizon <DAYS>    Latest execution offset in days, 0 to 3650 (default: 5)
    --start <DATE>      Date the script starts from (default: local date)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    treasury-engine accounts --format json
    treasury-engine run --script day.json --today 2026-01-05
    treasury-engine run --script day.json --currency KES
    treasury-engine generate --transfers 20 --output day.json"#
    );
}

/// One step of a replay script.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum ScriptStep {
    Transfer(TransferRequest),
    Advance { days: i64 },
    SetDate { date: NaiveDate },
}

#[derive(Debug, Serialize, Deserialize)]
struct ScriptFile {
    steps: Vec<ScriptStep>,
}

/// JSON output schema for a replayed step.
#[derive(Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
enum StepOutput {
    Submitted {
        today: NaiveDate,
        outcome: SubmitOutcome,
    },
    Rejected {
        today: NaiveDate,
        request: TransferRequest,
        kind: &'static str,
        message: String,
    },
    Tick(TickReport),
}

#[derive(Serialize)]
struct RunOutput {
    steps: Vec<StepOutput>,
    summary: TreasurySummary,
}

#[derive(Serialize)]
struct RateOutput {
    from: CurrencyCode,
    to: CurrencyCode,
    rate: Decimal,
}

fn required(args: &[String], i: usize, what: &str) -> String {
    args.get(i).cloned().unwrap_or_else(|| {
        eprintln!("{}", what);
        process::exit(1);
    })
}

fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_else(|e| {
        eprintln!("Invalid date '{}': {} (expected YYYY-MM-DD)", s, e);
        process::exit(1);
    })
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error serializing output: {}", e);
        process::exit(1);
    })
}

fn load_config(path: Option<&str>) -> TreasuryConfig {
    match path {
        None => TreasuryConfig::default(),
        Some(path) => TreasuryConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            eprintln!("Expected format:");
            eprintln!(
                r#"{{
  "accounts": [
    {{ "id": "Mpesa_KES_1", "currency": "KES", "balance": "50000" }}
  ],
  "fx_rates": [
    {{ "from": "KES", "to": "USD", "rate": "0.0068" }}
  ]
}}"#
            );
            process::exit(1);
        }),
    }
}

fn build_treasury(config: &TreasuryConfig) -> Treasury {
    Treasury::from_config(config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    })
}

fn load_script(path: &str) -> ScriptFile {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing script: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "steps": [
    {{ "action": "transfer", "from": "Bank_USD_1", "to": "Bank_NGN_1", "amount": "10", "note": "payroll" }},
    {{ "action": "transfer", "from": "Bank_NGN_1", "to": "Bank_KES_3", "amount": "1000", "execute_on": "2026-01-07" }},
    {{ "action": "advance", "days": 2 }},
    {{ "action": "set_date", "date": "2026-01-10" }}
  ]
}}"#
        );
        process::exit(1);
    })
}

fn cmd_accounts(args: &[String]) {
    let mut config_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                config_path = Some(required(args, i, "--config requires a file path"));
            }
            "--format" => {
                i += 1;
                format = required(args, i, "--format requires 'text' or 'json'");
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let treasury = build_treasury(&load_config(config_path.as_deref()));
    let summary = TreasurySummary::capture(&treasury, &TransactionFilter::all());

    if format == "json" {
        println!("{}", to_json(&summary));
    } else {
        println!("{}", summary);
    }
}

fn cmd_rates(args: &[String]) {
    let mut config_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                config_path = Some(required(args, i, "--config requires a file path"));
            }
            "--format" => {
                i += 1;
                format = required(args, i, "--format requires 'text' or 'json'");
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let treasury = build_treasury(&load_config(config_path.as_deref()));
    let routes = treasury.rates().routes();

    if format == "json" {
        let output: Vec<RateOutput> = routes
            .into_iter()
            .map(|(from, to, rate)| RateOutput { from, to, rate })
            .collect();
        println!("{}", to_json(&output));
    } else if routes.is_empty() {
        println!("No FX routes configured.");
    } else {
        println!("=== FX Routes ===");
        for (from, to, rate) in routes {
            println!("  {} -> {}  {}", from, to, rate);
        }
    }
}

fn print_tick(report: &TickReport) {
    if report.is_empty() {
        return;
    }
    if let Some(date) = report.date {
        println!("Tick {}:", date);
    }
    for tx in &report.completed {
        println!(
            "  settled  {} -> {}  {} {} -> {:.2} {}",
            tx.from(),
            tx.to(),
            tx.amount(),
            tx.from_currency(),
            tx.converted_amount(),
            tx.to_currency()
        );
    }
    for failed in &report.failed {
        println!(
            "  failed   {}  {} -> {}  {}",
            failed.entry.id, failed.entry.request.from, failed.entry.request.to, failed.reason
        );
    }
}

fn cmd_run(args: &[String]) {
    let mut script_path = None;
    let mut config_path = None;
    let mut today = None;
    let mut format = "text".to_string();
    let mut filter = TransactionFilter::all();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--script" => {
                i += 1;
                script_path = Some(required(args, i, "--script requires a file path"));
            }
            "--config" => {
                i += 1;
                config_path = Some(required(args, i, "--config requires a file path"));
            }
            "--today" => {
                i += 1;
                today = Some(parse_date(&required(args, i, "--today requires a date")));
            }
            "--format" => {
                i += 1;
                format = required(args, i, "--format requires 'text' or 'json'");
            }
            "--account" => {
                i += 1;
                let id = required(args, i, "--account requires an account id");
                filter = filter.account(AccountId::new(id));
            }
            "--currency" => {
                i += 1;
                let code = required(args, i, "--currency requires a currency code");
                let currency: CurrencyCode = code.parse().unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                });
                filter = filter.currency(currency);
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = script_path.unwrap_or_else(|| {
        eprintln!("Error: --script <FILE> is required");
        process::exit(1);
    });

    let script = load_script(&path);
    let mut treasury = build_treasury(&load_config(config_path.as_deref()));
    let mut clock = FixedClock::new(today.unwrap_or_else(|| SystemClock.today()));
    let json = format == "json";
    let mut steps = Vec::new();

    info!("replaying {} steps from {}", script.steps.len(), clock.today());
    let report = treasury.tick(clock.today());
    if !json {
        print_tick(&report);
    }
    steps.push(StepOutput::Tick(report));

    for step in script.steps {
        match step {
            ScriptStep::Transfer(request) => {
                let day = clock.today();
                match treasury.submit(request.clone(), day) {
                    Ok(outcome) => {
                        if !json {
                            match &outcome {
                                SubmitOutcome::Completed(tx) => println!(
                                    "{}  transfer {} -> {}  {} {} -> {:.2} {}",
                                    day,
                                    tx.from(),
                                    tx.to(),
                                    tx.amount(),
                                    tx.from_currency(),
                                    tx.converted_amount(),
                                    tx.to_currency()
                                ),
                                SubmitOutcome::Scheduled(entry) => println!(
                                    "{}  scheduled {} for {}  {} -> {}  {}",
                                    day,
                                    entry.id,
                                    entry.execute_on,
                                    entry.request.from,
                                    entry.request.to,
                                    entry.request.amount
                                ),
                            }
                        }
                        steps.push(StepOutput::Submitted {
                            today: day,
                            outcome,
                        });
                    }
                    Err(e) => {
                        if !json {
                            println!(
                                "{}  rejected {} -> {}  {}: {}",
                                day, request.from, request.to, request.amount, e
                            );
                        }
                        steps.push(StepOutput::Rejected {
                            today: day,
                            kind: e.kind(),
                            message: e.to_string(),
                            request,
                        });
                    }
                }
            }
            ScriptStep::Advance { days } => {
                let day = clock.advance_days(days);
                let report = treasury.tick(day);
                if !json {
                    print_tick(&report);
                }
                steps.push(StepOutput::Tick(report));
            }
            ScriptStep::SetDate { date } => {
                clock.set(date);
                let report = treasury.tick(date);
                if !json {
                    print_tick(&report);
                }
                steps.push(StepOutput::Tick(report));
            }
        }
    }

    let summary = TreasurySummary::capture(&treasury, &filter);
    if json {
        println!("{}", to_json(&RunOutput { steps, summary }));
    } else {
        println!("\n{}", summary);
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = WorkloadConfig {
        include_past_dated: true,
        ..Default::default()
    };
    let mut start = None;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--transfers" => {
                i += 1;
                config.transfers = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--transfers requires a number");
                        process::exit(1);
                    });
            }
            "--horizon" => {
                i += 1;
                config.horizon_days = args
                    .get(i)
                    .and_then(|s| s.parse::<i64>().ok())
                    .filter(|days| (0..=MAX_HORIZON_DAYS).contains(days))
                    .unwrap_or_else(|| {
                        eprintln!(
                            "--horizon requires a number of days between 0 and {}",
                            MAX_HORIZON_DAYS
                        );
                        process::exit(1);
                    });
            }
            "--start" => {
                i += 1;
                start = Some(parse_date(&required(args, i, "--start requires a date")));
            }
            "--output" => {
                i += 1;
                output_path = Some(required(args, i, "--output requires a file path"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let start = start.unwrap_or_else(|| SystemClock.today());
    let accounts: Vec<AccountId> = TreasuryConfig::default()
        .accounts
        .into_iter()
        .map(|a| a.id)
        .collect();
    let requests = generate_transfers(&config, &accounts, start);
    let transfer_count = requests.len();

    let mut steps: Vec<ScriptStep> = requests.into_iter().map(ScriptStep::Transfer).collect();
    for _ in 0..config.horizon_days {
        steps.push(ScriptStep::Advance { days: 1 });
    }

    let json = to_json(&ScriptFile { steps });

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} transfers over {} days from {} → {}",
            transfer_count, config.horizon_days, start, path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "accounts" => cmd_accounts(rest),
        "rates" => cmd_rates(rest),
        "run" => cmd_run(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
