use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use welstory_menu::{
    OutputFormat, OutputMode, ParseOptions, aggregate_entries, analyze, csv_out, parse_day,
    read_page,
};

#[derive(Debug, Parser)]
#[command(
    name = "menu2cal",
    version,
    about = "Turn a cafeteria weekly menu sheet into dated meal records"
)]
struct Cli {
    /// Menu sheet: a PDF, or pdf2json output ending in .json.
    input: PathBuf,

    /// Only keep the menu served on this day (YYYY-MM-DD).
    #[arg(value_parser = parse_day)]
    date: Option<NaiveDate>,

    /// Year the sheet's month/day cells belong to (defaults to this year).
    #[arg(long)]
    year: Option<i32>,

    /// Group entries into one calendar slot per serving time.
    #[arg(long)]
    slots: bool,

    /// Output format: json or csv.
    #[arg(long, default_value = "json")]
    format: OutputFormat,

    /// Write to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the reconstructed table, dates and warnings as well.
    #[arg(short, long)]
    debug: bool,
}

fn render(cli: &Cli, mode: OutputMode, options: &ParseOptions) -> Result<(String, usize)> {
    let page = read_page(&cli.input)
        .with_context(|| format!("failed to read '{}'", cli.input.display()))?;
    let report = analyze(&page, options)
        .with_context(|| format!("failed to parse menu in '{}'", cli.input.display()))?;

    for warning in &report.warnings {
        tracing::warn!(code = ?warning.code, count = ?warning.count, "{}", warning.message);
    }

    if cli.debug {
        let structure = serde_json::to_string_pretty(&report)?;
        eprintln!("{structure}");
    }

    let rendered = match (mode, cli.format) {
        (OutputMode::Entries, OutputFormat::Json) => {
            (serde_json::to_string_pretty(&report.entries)?, report.entries.len())
        }
        (OutputMode::Entries, OutputFormat::Csv) => {
            (csv_out::entries_to_csv(&report.entries)?, report.entries.len())
        }
        (OutputMode::Slots, format) => {
            let slots = aggregate_entries(&report.entries);
            let body = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&slots)?,
                OutputFormat::Csv => csv_out::slots_to_csv(&slots)?,
            };
            (body, slots.len())
        }
    };

    Ok(rendered)
}

fn run(cli: &Cli) -> Result<usize> {
    if let Some(year) = cli.year
        && !(1..=9999).contains(&year)
    {
        return Err(anyhow!("--year must be within 1..=9999"));
    }

    let mode = if cli.slots {
        OutputMode::Slots
    } else {
        OutputMode::Entries
    };
    let options = ParseOptions {
        year: cli.year,
        date: cli.date,
    };

    let (body, count) = render(cli, mode, &options)?;
    match &cli.output {
        Some(path) => std::fs::write(path, body)
            .with_context(|| format!("failed to write '{}'", path.display()))?,
        None if body.ends_with('\n') => print!("{body}"),
        None => println!("{body}"),
    }

    Ok(count)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.debug {
        "welstory_menu=debug"
    } else {
        "welstory_menu=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match run(&cli) {
        Ok(count) if count > 0 => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(2),
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}
