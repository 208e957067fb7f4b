use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use availability_engine::{
    initial_values, normalize, timezone_label, validate, FormOptions, Schedule, ScheduleInput,
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "availability", about = "Validate and normalize weekly availability schedules")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate form input and print the normalized schedule
    Check {
        /// Input file (reads stdin if omitted or "-")
        input: Option<PathBuf>,
    },
    /// Print the values a schedule form should start with
    Init {
        /// A previously saved schedule
        #[arg(long)]
        saved: Option<PathBuf>,
        /// Timezone used when nothing is saved [default: $TZ, then UTC]
        #[arg(long)]
        default_timezone: Option<String>,
    },
    /// Print a timezone's picker label with its current UTC offset
    Label {
        timezone: String,
        /// Instant to take the offset at (RFC 3339), defaults to now
        #[arg(long)]
        at: Option<String>,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("availability=warn,availability_engine=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Check { input } => check(input),
        Command::Init {
            saved,
            default_timezone,
        } => init(saved, default_timezone.as_deref()),
        Command::Label { timezone, at } => label(&timezone, at.as_deref()),
    }
}

fn check(input: Option<PathBuf>) -> Result<ExitCode> {
    let text = read_input(input)?;
    let values: ScheduleInput =
        serde_json::from_str(&text).context("Failed to parse schedule input JSON")?;

    match validate(&values.timezone, &values.availabilities) {
        Ok(schedule) => {
            print_json(&normalize(schedule))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::info!(error = %e, "schedule rejected");
            print_json(&json!({ "errors": e.form_messages() }))?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn init(saved: Option<PathBuf>, default_timezone: Option<&str>) -> Result<ExitCode> {
    let default_timezone = match default_timezone {
        Some(name) => name
            .parse::<Tz>()
            .map_err(|_| anyhow::anyhow!("Invalid default timezone: '{name}'"))?,
        None => host_timezone(),
    };
    let options = FormOptions { default_timezone };

    let saved: Option<Schedule> = match saved {
        Some(path) => {
            let text = read_input(Some(path))?;
            Some(serde_json::from_str(&text).context("Saved schedule is invalid")?)
        }
        None => None,
    };

    print_json(&initial_values(saved.as_ref(), &options))?;
    Ok(ExitCode::SUCCESS)
}

/// The zone named by `TZ`, or UTC when it is unset or not an IANA name
/// (e.g. `:/etc/localtime` or a POSIX rule like `EST5EDT,M3.2.0,M11.1.0`).
fn host_timezone() -> Tz {
    let Ok(value) = std::env::var("TZ") else {
        return Tz::UTC;
    };
    // POSIX allows a leading ':' before a zone name
    match value.trim_start_matches(':').parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            tracing::warn!(tz = %value, "TZ is not an IANA timezone name, using UTC");
            Tz::UTC
        }
    }
}

fn label(timezone: &str, at: Option<&str>) -> Result<ExitCode> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid timezone: '{timezone}'"))?;
    let at = match at {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("Invalid datetime: '{s}'"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    println!("{}", timezone_label(tz, at));
    Ok(ExitCode::SUCCESS)
}

fn read_input(path: Option<PathBuf>) -> Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => {
            fs::read_to_string(&p).with_context(|| format!("Failed to read {}", p.display()))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{out}");
    Ok(())
}
