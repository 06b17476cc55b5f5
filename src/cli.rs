//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvSignalAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::svg_chart;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::error::SigperfError;
use crate::domain::pairing::{pair_trades, PairingPolicy};
use crate::domain::performance::summarize;
use crate::domain::series::SeriesSummary;
use crate::domain::trade::compute_returns;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::SignalDataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "sigperf", about = "Trading signal performance analyzer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pair signals into trades and report performance
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
        /// Override the CSV path from the config
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Override the report output path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pairing policy: allow_multi_match or consume_once
        #[arg(long)]
        policy: Option<String>,
    },
    /// Render the signal chart as SVG
    Chart {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show date range and signal counts for a CSV file
    Info {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Validate a config file and its signal data
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            config,
            csv,
            output,
            policy,
        } => run_analyze(&config, csv.as_ref(), output.as_ref(), policy.as_deref()),
        Command::Chart { config, output } => run_chart(&config, output.as_ref()),
        Command::Info { csv } => run_info(&csv),
        Command::Validate { config } => run_validate(&config),
    }
}

/// Everything the pipeline needs, resolved from config with CLI
/// overrides already applied.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub csv_path: PathBuf,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub policy: PairingPolicy,
    pub output_path: PathBuf,
    pub chart_path: PathBuf,
    pub include_trades: bool,
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = SigperfError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn parse_config_date(
    adapter: &dyn ConfigPort,
    key: &str,
) -> Result<Option<NaiveDate>, SigperfError> {
    match adapter.get_string("data", key) {
        None => Ok(None),
        Some(value) => NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| SigperfError::ConfigInvalid {
                section: "data".into(),
                key: key.into(),
                reason: "invalid date format (expected YYYY-MM-DD)".into(),
            }),
    }
}

pub fn build_settings(adapter: &dyn ConfigPort) -> Result<AnalysisSettings, SigperfError> {
    let csv_path = adapter
        .get_string("data", "csv_path")
        .ok_or_else(|| SigperfError::ConfigMissing {
            section: "data".into(),
            key: "csv_path".into(),
        })?;

    let start_date = parse_config_date(adapter, "start_date")?;
    let end_date = parse_config_date(adapter, "end_date")?;
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            return Err(SigperfError::ConfigInvalid {
                section: "data".into(),
                key: "end_date".into(),
                reason: format!("end date {} is before start date {}", end, start),
            });
        }
    }

    let policy = match adapter.get_string("pairing", "policy") {
        None => PairingPolicy::default(),
        Some(value) => {
            PairingPolicy::parse(&value).ok_or_else(|| SigperfError::ConfigInvalid {
                section: "pairing".into(),
                key: "policy".into(),
                reason: format!(
                    "unknown policy {:?} (expected allow_multi_match or consume_once)",
                    value
                ),
            })?
        }
    };

    Ok(AnalysisSettings {
        csv_path: PathBuf::from(csv_path),
        start_date,
        end_date,
        policy,
        output_path: adapter
            .get_string("report", "output_path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("report.txt")),
        chart_path: adapter
            .get_string("report", "chart_path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("signals.svg")),
        include_trades: adapter.get_bool("report", "include_trades", true),
    })
}

fn settings_from_config(path: &PathBuf) -> Result<AnalysisSettings, ExitCode> {
    eprintln!("Loading config from {}", path.display());
    let adapter = load_config(path)?;
    build_settings(&adapter).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn run_analyze(
    config_path: &PathBuf,
    csv_override: Option<&PathBuf>,
    output_override: Option<&PathBuf>,
    policy_override: Option<&str>,
) -> ExitCode {
    let mut settings = match settings_from_config(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };
    if let Some(csv) = csv_override {
        settings.csv_path = csv.clone();
    }
    if let Some(output) = output_override {
        settings.output_path = output.clone();
    }
    if let Some(policy) = policy_override {
        settings.policy = match PairingPolicy::parse(policy) {
            Some(p) => p,
            None => {
                eprintln!("error: unknown policy {:?}", policy);
                return ExitCode::from(2);
            }
        };
    }

    eprintln!("Loading signals from {}", settings.csv_path.display());
    let data_port = CsvSignalAdapter::new(settings.csv_path.clone());
    let records = match data_port.fetch_signals(settings.start_date, settings.end_date) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Pairing trades over {} records ({})",
        records.len(),
        settings.policy.as_str()
    );
    let trades = match pair_trades(&records, settings.policy) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let returns = match compute_returns(&trades) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let summary = summarize(&returns);
    let series = SeriesSummary::compute(&records);

    eprintln!("\n=== Performance Summary ===");
    eprintln!("Completed Trades: {}", summary.trade_count);
    match summary.stats {
        Some(stats) => {
            eprintln!("Average Return:   {:.2}%", stats.average_return * 100.0);
            eprintln!("Total Return:     {:.2}%", stats.total_return * 100.0);
            eprintln!("Win Rate:         {:.1}%", stats.win_rate * 100.0);
        }
        None => eprintln!("No completed trades; return statistics undefined"),
    }

    let report = TextReportAdapter::new(settings.include_trades);
    let output = settings.output_path.display().to_string();
    match report.write(&series, &returns, &summary, &output) {
        Ok(()) => {
            eprintln!("\nReport written to: {output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write report: {e}");
            (&e).into()
        }
    }
}

fn run_chart(config_path: &PathBuf, output_override: Option<&PathBuf>) -> ExitCode {
    let mut settings = match settings_from_config(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };
    if let Some(output) = output_override {
        settings.chart_path = output.clone();
    }

    let data_port = CsvSignalAdapter::new(settings.csv_path.clone());
    let records = match data_port.fetch_signals(settings.start_date, settings.end_date) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let svg = svg_chart::render_chart(&records);
    match fs::write(&settings.chart_path, svg) {
        Ok(()) => {
            eprintln!("Chart written to: {}", settings.chart_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write chart: {e}");
            ExitCode::from(1)
        }
    }
}

fn run_info(csv_path: &PathBuf) -> ExitCode {
    let data_port = CsvSignalAdapter::new(csv_path.clone());

    let range = match data_port.data_range() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match range {
        None => {
            eprintln!("No records in {}", csv_path.display());
            ExitCode::SUCCESS
        }
        Some((first, last, count)) => {
            let records = match data_port.fetch_signals(None, None) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("error: {e}");
                    return (&e).into();
                }
            };
            let series = SeriesSummary::compute(&records);

            println!("records:      {}", count);
            println!("date range:   {} to {}", first, last);
            println!(
                "price range:  {:.2} - {:.2}",
                series.close_min, series.close_max
            );
            println!("buy signals:  {}", series.buy_count);
            println!("sell signals: {}", series.sell_count);
            ExitCode::SUCCESS
        }
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let settings = match settings_from_config(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };
    eprintln!("Config validated successfully");

    let data_port = CsvSignalAdapter::new(settings.csv_path.clone());
    // Loading performs the full data validation: column presence,
    // labels, positive closes, strict date ordering.
    match data_port.fetch_signals(settings.start_date, settings.end_date) {
        Ok(records) => {
            eprintln!("Signal data valid: {} records", records.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
