// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use corte_caja::config::{self, ResolvedConfig};
use corte_caja::{dispatch, max_amount, parse_amount, Command, MovementKind, Outcome, Session};

#[derive(Parser)]
#[command(name = "corte-caja", version, about = "Daily cash-drawer reconciliation")]
struct Args {
    /// Config file (defaults to <config_dir>/corte-caja/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log file used by the interactive UI
    #[arg(long, default_value = "corte-caja.log")]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Interactive terminal UI (default)
    Tui,
    /// Run one session non-interactively and write the PDF report
    Corte(CorteArgs),
}

#[derive(clap::Args)]
struct CorteArgs {
    /// Opening cash amount
    #[arg(long)]
    opening: Option<String>,

    /// Movement as KIND:LABEL:AMOUNT[:YYYY-MM-DD], repeatable
    #[arg(long = "movement", value_parser = parse_movement)]
    movements: Vec<MovementArg>,

    /// CSV file with Nombre and Precio columns
    #[arg(long)]
    import: Option<PathBuf>,

    /// Report date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Output directory for the PDF
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print totals as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone)]
struct MovementArg {
    kind: MovementKind,
    label: String,
    amount: Decimal,
    date: Option<NaiveDate>,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date {:?}, expected YYYY-MM-DD", s))
}

fn parse_movement(s: &str) -> Result<MovementArg, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(format!("expected KIND:LABEL:AMOUNT[:DATE], got {:?}", s));
    }

    let kind: MovementKind = parts[0].parse()?;
    let amount = parse_amount(parts[2]).ok_or_else(|| format!("invalid amount {:?}", parts[2]))?;
    let date = match parts.get(3) {
        Some(raw) => Some(parse_date(raw)?),
        None => None,
    };

    Ok(MovementArg {
        kind,
        label: parts[1].trim().to_string(),
        amount,
        date,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::load(args.config.as_deref()).context("Failed to load configuration")?;

    match args.command {
        Some(Cmd::Corte(corte)) => {
            init_stderr_logging();
            run_corte(corte, &config)
        }
        Some(Cmd::Tui) | None => {
            init_file_logging(&args.log_file)?;
            run_ui_mode(config)
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

// The TUI owns the terminal, so logs go to a file
fn init_file_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run_corte(args: CorteArgs, config: &ResolvedConfig) -> Result<()> {
    // Opening and imported rows are dated the day they are entered; `date`
    // names the report and defaults the date of --movement entries
    let today = Local::now().date_naive();
    let date = args.date.unwrap_or(today);
    let mut session = Session::with_opening_label(config.opening_label.clone());

    info!(%date, "Running batch corte");

    // 1. Opening balance
    if let Some(raw) = &args.opening {
        let amount = parse_amount(raw).with_context(|| format!("Invalid opening amount {:?}", raw))?;
        dispatch(&mut session, Command::SetDrawerActive(true), today)?;
        if let Outcome::OpeningBalance(false) =
            dispatch(&mut session, Command::RegisterOpeningBalance(amount), today)?
        {
            bail!(
                "Opening amount must be greater than zero and at most {}",
                max_amount()
            );
        }
    }

    // 2. Manual movements
    for movement in args.movements {
        if !config.is_allowed_label(&movement.label) {
            bail!(
                "Unknown label {:?}; allowed: {}",
                movement.label,
                config.labels.join(", ")
            );
        }

        let command = Command::RegisterMovement {
            kind: movement.kind,
            label: movement.label.clone(),
            amount: movement.amount,
            date: movement.date.unwrap_or(date),
        };
        dispatch(&mut session, command, today)
            .with_context(|| format!("Invalid movement {:?}", movement.label))?;
    }

    // 3. CSV import
    if let Some(path) = &args.import {
        let table = corte_caja::read_table_from_path(path, config.delimiter)
            .with_context(|| format!("Failed to import {}", path.display()))?;
        dispatch(&mut session, Command::ImportTable(table), today)
            .with_context(|| format!("Failed to import {}", path.display()))?;
    }

    // 4. Report
    let out_dir = args.out.unwrap_or_else(|| config.output_dir.clone());
    let pdf_path = session
        .write_report(&out_dir, date)
        .context("Failed to export report")?;

    let totals = session.totals();
    if args.json {
        let output = serde_json::json!({
            "date": date,
            "totals": totals,
            "manual_records": session.manual_records(),
            "imported_records": session.imported_records().len(),
            "pdf": pdf_path,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Corte de Caja - {}", date.format("%Y-%m-%d"));
        for line in totals.summary_lines() {
            println!("{}", line);
        }
        println!("PDF guardado en {}", pdf_path.display());
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: ResolvedConfig) -> Result<()> {
    info!("Starting interactive UI");
    let mut app = ui::App::new(config, Local::now().date_naive());
    ui::run_ui(&mut app)?;
    info!("UI closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: ResolvedConfig) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use batch mode: corte-caja corte --help");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_movement() {
        let m = parse_movement("egreso:Proveedor B:40.00").unwrap();
        assert_eq!(m.kind, MovementKind::Expense);
        assert_eq!(m.label, "Proveedor B");
        assert_eq!(m.amount, Decimal::new(4000, 2));
        assert!(m.date.is_none());

        let m = parse_movement("Ingreso:Proveedor A:100:2024-01-01").unwrap();
        assert_eq!(m.date, NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn test_parse_movement_rejects_bad_input() {
        assert!(parse_movement("ingreso:Proveedor A").is_err());
        assert!(parse_movement("otro:Proveedor A:10").is_err());
        assert!(parse_movement("ingreso:Proveedor A:abc").is_err());
        assert!(parse_movement("ingreso:Proveedor A:10:01/01/2024").is_err());
    }
}
