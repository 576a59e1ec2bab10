// RosterGrid CLI - headless schedule operations

mod ai;
mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, Subcommand};

use rostergrid_config::ai::get_api_key;
use rostergrid_config::settings::Settings;
use rostergrid_engine::slots::derive_slots;
use rostergrid_io::{export_file_name, export_schedule, import_schedule};

use exit_codes::{EXIT_AI_DISABLED, EXIT_AI_MISSING_KEY, EXIT_ERROR, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "rgrid")]
#[command(about = "Squad timetable editing (CLI mode, headless)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a timetable workbook and print its sessions
    #[command(after_help = "\
Examples:
  rgrid import timetable.xlsx
  rgrid import timetable.xlsx --json | jq .date")]
    Import {
        /// Input workbook (.xlsx, .xls, .xlsb, .ods)
        input: PathBuf,

        /// Emit sessions as JSON lines instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the grid's time-slot columns for a workbook
    Slots {
        /// Input workbook
        input: PathBuf,
    },

    /// Export one squad's updated schedule as a new workbook
    #[command(after_help = "\
Examples:
  rgrid export timetable.xlsx --squad 4
  rgrid export timetable.xlsx --squad 4 -o updated.xlsx")]
    Export {
        /// Input workbook
        input: PathBuf,

        /// Squad identifier (matched case-insensitively)
        #[arg(long)]
        squad: String,

        /// Output file (default: {squad}_updated_on_{date}_{time}.xlsx)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// AI commentary on one squad's schedule
    Analyze {
        /// Input workbook
        input: PathBuf,

        /// Squad identifier (matched case-insensitively)
        #[arg(long)]
        squad: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Import { input, json } => run_import(&input, json),
        Commands::Slots { input } => run_slots(&input),
        Commands::Export {
            input,
            squad,
            output,
        } => run_export(&input, &squad, output),
        Commands::Analyze { input, squad } => run_analyze(&input, &squad),
    };

    ExitCode::from(code)
}

fn run_import(input: &PathBuf, json: bool) -> u8 {
    let outcome = match import_schedule(input) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("error: {}", e);
            return EXIT_ERROR;
        }
    };

    if json {
        for session in &outcome.sessions {
            match serde_json::to_string(session) {
                Ok(line) => println!("{}", line),
                Err(e) => {
                    eprintln!("error: {}", e);
                    return EXIT_ERROR;
                }
            }
        }
    } else {
        for s in &outcome.sessions {
            let to = if s.to.is_empty() { "????" } else { &s.to };
            println!(
                "{}  {}-{}  squad {:<6} {}  {}",
                s.date, s.from, to, s.squad, s.course_id, s.mentor_id
            );
        }
        eprintln!("{}", outcome.report.summary());
    }

    EXIT_SUCCESS
}

fn run_slots(input: &PathBuf) -> u8 {
    let outcome = match import_schedule(input) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("error: {}", e);
            return EXIT_ERROR;
        }
    };

    for slot in derive_slots(&outcome.sessions) {
        if slot.to.is_empty() {
            println!("{}", slot.from);
        } else {
            println!("{}-{}", slot.from, slot.to);
        }
    }

    EXIT_SUCCESS
}

fn run_export(input: &PathBuf, squad: &str, output: Option<PathBuf>) -> u8 {
    let outcome = match import_schedule(input) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("error: {}", e);
            return EXIT_ERROR;
        }
    };

    let path =
        output.unwrap_or_else(|| PathBuf::from(export_file_name(squad, Local::now().naive_local())));

    match export_schedule(&path, squad, &outcome.sessions) {
        Ok(rows) => {
            println!("Wrote {} rows to {}", rows, path.display());
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            EXIT_ERROR
        }
    }
}

fn run_analyze(input: &PathBuf, squad: &str) -> u8 {
    let outcome = match import_schedule(input) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("error: {}", e);
            return EXIT_ERROR;
        }
    };

    let picked: Vec<_> = outcome
        .sessions
        .iter()
        .filter(|s| s.in_squad(squad))
        .cloned()
        .collect();
    let summary = ai::schedule_summary(squad, &picked);

    let settings = Settings::load();
    if !settings.ai.provider.is_enabled() {
        // The commentary degrades to the fallback; the exit code still
        // tells scripts why.
        println!("{}", ai::ANALYSIS_FALLBACK);
        eprintln!("note: AI provider is disabled (see settings.json)");
        return EXIT_AI_DISABLED;
    }

    let lookup = get_api_key(settings.ai.provider.name());
    let api_key = match lookup.key {
        Some(key) => key,
        None => {
            println!("{}", ai::ANALYSIS_FALLBACK);
            eprintln!("note: no API key in the environment");
            return EXIT_AI_MISSING_KEY;
        }
    };

    match ai::analyze(&settings.ai, &api_key, &summary) {
        Ok(commentary) => {
            println!("{}", commentary);
            EXIT_SUCCESS
        }
        Err(e) => {
            // Recovered locally: the user sees the fixed fallback, the
            // detail goes to stderr only.
            println!("{}", ai::ANALYSIS_FALLBACK);
            eprintln!("note: {}", e);
            EXIT_SUCCESS
        }
    }
}
