//! `slots` CLI: list calendars, suggest meeting slots, and run the slot search
//! offline over busy data from a file.
//!
//! ## Usage
//!
//! ```sh
//! # Calendars the signed-in user can read
//! GOOGLE_ACCESS_TOKEN=ya29... slots calendars
//!
//! # Suggest 30-minute slots for me and two colleagues over a week
//! slots --user-email me@example.com suggest \
//!     --attendees alice@example.com,bob@example.com \
//!     --start-date 2024-01-01 --end-date 2024-01-07 --duration 30
//!
//! # Merge busy intervals from a file (stdin → stdout)
//! slots merge < busy.json
//!
//! # Offline slot search with an explicit working window
//! slots find -i busy.json --start 2024-01-01T00:00:00+09:00 \
//!     --end 2024-01-01T23:59:59+09:00 --duration 60 --offset +09:00
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use slot_engine::{find_slots, merge, BusyInterval, CandidateSlot, WorkingWindow};
use slot_suggest::config::parse_time_zone;
use slot_suggest::format::format_slots;
use slot_suggest::provider::FreeBusyResult;
use slot_suggest::{
    parse_attendees, GoogleCalendarClient, Session, SuggestConfig, SuggestRequest, Suggester,
};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Find open meeting slots across calendars"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// OAuth access token for the calendar provider
    #[arg(long, env = "GOOGLE_ACCESS_TOKEN", hide_env_values = true, global = true)]
    access_token: Option<String>,

    /// Calendar address of the signed-in user (always included as an attendee)
    #[arg(long, env = "SLOTS_USER_EMAIL", global = true)]
    user_email: Option<String>,

    /// Reference timezone (IANA name), overrides SLOTS_TIME_ZONE
    #[arg(long, global = true)]
    time_zone: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List calendars whose busy data can be read
    Calendars {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Suggest meeting start times for a set of attendees
    Suggest {
        /// Comma-separated calendar ids to check besides your own
        #[arg(long, default_value = "")]
        attendees: String,
        /// First day to search (YYYY-MM-DD, reference timezone)
        #[arg(long)]
        start_date: NaiveDate,
        /// Last day to search (YYYY-MM-DD, inclusive)
        #[arg(long)]
        end_date: NaiveDate,
        /// Meeting length in minutes
        #[arg(long, default_value_t = 30, allow_hyphen_values = true)]
        duration: i64,
        /// Print JSON including per-calendar busy data
        #[arg(long)]
        json: bool,
    },
    /// Merge busy intervals read from JSON
    Merge {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Search for slots in busy intervals read from JSON, without network access
    Find {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Range start (RFC 3339)
        #[arg(long)]
        start: DateTime<Utc>,
        /// Range end (RFC 3339)
        #[arg(long)]
        end: DateTime<Utc>,
        /// Meeting length in minutes
        #[arg(long, default_value_t = 30, allow_hyphen_values = true)]
        duration: i64,
        /// First working hour (defaults to SLOTS_WORK_START_HOUR or 9)
        #[arg(long)]
        work_start: Option<u32>,
        /// Hour the working day ends (defaults to SLOTS_WORK_END_HOUR or 17)
        #[arg(long)]
        work_end: Option<u32>,
        /// Fixed UTC offset such as +09:00 (defaults to the reference timezone)
        #[arg(long, value_parser = parse_offset, allow_hyphen_values = true)]
        offset: Option<FixedOffset>,
        /// Print JSON instead of formatted times
        #[arg(long)]
        json: bool,
    },
}

/// Busy data accepted on input: a flat list, or busy lists keyed by calendar.
#[derive(Deserialize)]
#[serde(untagged)]
enum BusyInput {
    Flat(Vec<BusyInterval>),
    PerCalendar(FreeBusyResult),
}

impl BusyInput {
    fn into_intervals(self) -> Vec<BusyInterval> {
        match self {
            BusyInput::Flat(intervals) => intervals,
            BusyInput::PerCalendar(calendars) => calendars
                .into_values()
                .flat_map(|cal| cal.busy)
                .collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestOutput<'a> {
    suggestions: Vec<String>,
    slots: &'a [CandidateSlot],
    calendar_data: &'a FreeBusyResult,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Calendars { json } => {
            let config = load_config(cli.time_zone.as_deref())?;
            let session = Session::new(cli.access_token, cli.user_email);
            let client = GoogleCalendarClient::new(&config.api_base);
            let suggester = Suggester::new(client, config);

            let calendars = suggester
                .list_calendars(&session)
                .await
                .context("Failed to fetch calendar list")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&calendars)?);
            } else {
                for cal in &calendars {
                    println!(
                        "{}\t{}\t{}",
                        cal.id,
                        cal.access_role.as_str(),
                        cal.summary.as_deref().unwrap_or("")
                    );
                }
            }
        }
        Commands::Suggest {
            attendees,
            start_date,
            end_date,
            duration,
            json,
        } => {
            let config = load_config(cli.time_zone.as_deref())?;
            let session = Session::new(cli.access_token, cli.user_email);
            let client = GoogleCalendarClient::new(&config.api_base);
            let suggester = Suggester::new(client, config);
            let request = SuggestRequest {
                attendees: parse_attendees(&attendees),
                start_date,
                end_date,
                duration_minutes: duration,
            };

            let suggestion = suggester
                .suggest(&session, &request)
                .await
                .context("Failed to suggest meeting slots")?;
            let formatted = format_slots(&suggestion.slots, suggestion.offset);

            if json {
                let output = SuggestOutput {
                    suggestions: formatted,
                    slots: &suggestion.slots,
                    calendar_data: &suggestion.calendars,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_slots(&formatted);
            }
        }
        Commands::Merge { input, output } => {
            let raw = read_input(input.as_deref())?;
            let busy: BusyInput =
                serde_json::from_str(&raw).context("Failed to parse busy intervals")?;
            let merged = merge(busy.into_intervals());
            debug!(merged = merged.len(), "merged busy intervals");
            let pretty = serde_json::to_string_pretty(&merged)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Find {
            input,
            start,
            end,
            duration,
            work_start,
            work_end,
            offset,
            json,
        } => {
            let raw = read_input(input.as_deref())?;
            let busy: BusyInput =
                serde_json::from_str(&raw).context("Failed to parse busy intervals")?;
            let merged = merge(busy.into_intervals());

            let config = load_config(cli.time_zone.as_deref())?;
            let offset = offset.unwrap_or_else(|| config.offset_at(start));
            let window = WorkingWindow::new(
                work_start.unwrap_or(config.work_start_hour),
                work_end.unwrap_or(config.work_end_hour),
                offset,
            )
            .context("Invalid working window")?;

            let slots = find_slots(&merged, start, end, duration, &window)
                .context("Failed to search for slots")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&slots)?);
            } else {
                print_slots(&format_slots(&slots, window.offset()));
            }
        }
    }

    Ok(())
}

fn load_config(time_zone: Option<&str>) -> Result<SuggestConfig> {
    let mut config = SuggestConfig::from_env().context("Failed to load configuration")?;
    if let Some(tz) = time_zone {
        config.time_zone = parse_time_zone(tz)?;
    }
    Ok(config)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_slots(formatted: &[String]) {
    if formatted.is_empty() {
        println!("No available slots found.");
    }
    for slot in formatted {
        println!("{}", slot);
    }
}

/// Parse `Z`, `UTC`, `+09:00`, `-0530` or `+9` into a fixed offset.
fn parse_offset(raw: &str) -> Result<FixedOffset, String> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(|| "invalid offset".to_string());
    }

    let (sign, rest) = match raw.as_bytes().first() {
        Some(b'+') => (1, &raw[1..]),
        Some(b'-') => (-1, &raw[1..]),
        _ => return Err(format!("offset must start with + or -: {}", raw)),
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 && rest.is_ascii() => rest.split_at(2),
        None => (rest, "0"),
    };
    let hours = offset_field(hours, 23).ok_or_else(|| format!("invalid offset hours: {}", raw))?;
    let minutes =
        offset_field(minutes, 59).ok_or_else(|| format!("invalid offset minutes: {}", raw))?;

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| format!("offset out of range: {}", raw))
}

/// One or two ASCII digits no greater than `max`.
fn offset_field(digits: &str, max: i32) -> Option<i32> {
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|value| *value <= max)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
