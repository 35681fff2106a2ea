//! Moodlens CLI - Command-line interface for the Moodlens insight engine
//!
//! Commands:
//! - analyze: Run the full analytics pass over journal files
//! - validate: Validate journal records against submission rules
//! - schema: Print record and report schema information
//! - doctor: Diagnose engine health and journal files

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use moodlens::correlation::QualityBands;
use moodlens::record::{JournalAdapter, RecordIssue};
use moodlens::report::{InsightEncoder, REPORT_SCHEMA_VERSION};
use moodlens::store::JournalStore;
use moodlens::{AnalysisError, MOODLENS_VERSION, PRODUCER_NAME};

/// Moodlens - Analytics and early-warning engine for mood and sleep journals
#[derive(Parser)]
#[command(name = "moodlens")]
#[command(version = MOODLENS_VERSION)]
#[command(about = "Turn journal exports into insight reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analytics pass over journal files
    Analyze {
        /// Mood entries file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Sleep log file
        #[arg(short, long)]
        sleep: Option<PathBuf>,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Pretty-print the report (default when stdout is a TTY)
        #[arg(long)]
        pretty: bool,

        /// Sleep quality at or below this counts as poor
        #[arg(long, default_value = "4")]
        poor_max: u8,

        /// Sleep quality at or above this counts as good
        #[arg(long, default_value = "7")]
        good_min: u8,
    },

    /// Validate journal records against submission rules
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Record kind in the input file
        #[arg(long, default_value = "mood")]
        kind: RecordKind,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print
        #[arg(value_enum)]
        schema_kind: SchemaKind,

        /// Output as JSON schema
        #[arg(long)]
        json_schema: bool,
    },

    /// Diagnose engine health and journal files
    Doctor {
        /// Check a mood entries file
        #[arg(long)]
        journal: Option<PathBuf>,

        /// Check a sleep log file
        #[arg(long)]
        sleep: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum RecordKind {
    /// Mood entries
    Mood,
    /// Sleep log records
    Sleep,
}

#[derive(Clone, ValueEnum)]
enum SchemaKind {
    /// Mood entry record shape
    Mood,
    /// Sleep log record shape
    Sleep,
    /// Insight report shape (insight.report.v1)
    Report,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), MoodlensCliError> {
    match cli.command {
        Commands::Analyze {
            input,
            sleep,
            output,
            pretty,
            poor_max,
            good_min,
        } => cmd_analyze(
            &input,
            sleep.as_deref(),
            &output,
            pretty,
            QualityBands { poor_max, good_min },
        ),

        Commands::Validate { input, kind, json } => cmd_validate(&input, kind, json),

        Commands::Schema {
            schema_kind,
            json_schema,
        } => cmd_schema(schema_kind, json_schema),

        Commands::Doctor {
            journal,
            sleep,
            json,
        } => cmd_doctor(journal.as_deref(), sleep.as_deref(), json),
    }
}

fn cmd_analyze(
    input: &PathBuf,
    sleep: Option<&std::path::Path>,
    output: &PathBuf,
    pretty: bool,
    bands: QualityBands,
) -> Result<(), MoodlensCliError> {
    // Read and parse the mood entries
    let entries_json = read_input(input)?;
    let entries = JournalAdapter::parse_entries(&entries_json)?;

    // Sleep records are optional; analytics that need them degrade on their own
    let sleep_records = if let Some(sleep_path) = sleep {
        let sleep_json = fs::read_to_string(sleep_path)?;
        JournalAdapter::parse_sleep(&sleep_json)?
    } else {
        Vec::new()
    };

    let store = JournalStore::with_records(entries, sleep_records);
    let encoder = InsightEncoder::with_bands(bands);
    let report = encoder.encode(store.entries(), store.sleep());

    let to_stdout = output.to_string_lossy() == "-";
    let pretty = pretty || (to_stdout && atty::is(atty::Stream::Stdout));

    let rendered = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    if to_stdout {
        println!("{}", rendered);
    } else {
        fs::write(output, rendered)?;
    }

    Ok(())
}

fn cmd_validate(input: &PathBuf, kind: RecordKind, json: bool) -> Result<(), MoodlensCliError> {
    let input_data = read_input(input)?;

    let (total, issues) = match kind {
        RecordKind::Mood => {
            let entries = JournalAdapter::parse_entries(&input_data)?;
            (entries.len(), JournalAdapter::validate_entries(&entries))
        }
        RecordKind::Sleep => {
            let records = JournalAdapter::parse_sleep(&input_data)?;
            (records.len(), JournalAdapter::validate_sleep(&records))
        }
    };

    // Issues arrive in index order, so dedup yields one slot per flagged record
    let mut flagged: Vec<usize> = issues.iter().map(|i| i.index).collect();
    flagged.dedup();

    let report = ValidationReport {
        total_records: total,
        clean_records: total - flagged.len(),
        flagged_records: flagged.len(),
        issues,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total records:   {}", report.total_records);
        println!("Clean records:   {}", report.clean_records);
        println!("Flagged records: {}", report.flagged_records);

        if !report.issues.is_empty() {
            println!("\nIssues:");
            for issue in &report.issues {
                println!(
                    "  - Record {} (index {}): {} {}",
                    issue.id.as_deref().unwrap_or("unknown"),
                    issue.index,
                    issue.field,
                    issue.reason
                );
            }
        }
    }

    if report.flagged_records > 0 {
        Err(MoodlensCliError::ValidationFailed(report.flagged_records))
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_kind: SchemaKind, json_schema: bool) -> Result<(), MoodlensCliError> {
    match schema_kind {
        SchemaKind::Mood => {
            if json_schema {
                println!("{}", get_mood_json_schema());
            } else {
                println!("Mood Entry Schema");
                println!();
                println!("Required fields:");
                println!("  - date: RFC 3339 timestamp");
                println!("  - mood: depressive | interfase | manic");
                println!("  - intensity: integer 1-10");
                println!();
                println!("Optional fields:");
                println!("  - aggressiveness, irritability: integer 1-10");
                println!("  - moodStability: boolean");
                println!("  - depressiveSymptoms: {{ insomnia, oversleeping, energyLoss,");
                println!("      lossOfInterest, suicidalThoughts, appetiteChanges }}");
                println!("  - manicSymptoms: {{ reducedSleep, rapidSpeech, racingThoughts,");
                println!("      impulsivity, excessiveSpending }}");
                println!("  - triggers: {{ stress, lackOfSleep, conflict, alcohol, seasonalChanges }}");
                println!("  - notes: string (max 1000 chars)");
                println!("  - voiceNote: string");
                println!();
                println!("Accepted containers: bare JSON array, or API envelope {{ \"data\": [...] }}");
            }
        }
        SchemaKind::Sleep => {
            if json_schema {
                println!("{}", get_sleep_json_schema());
            } else {
                println!("Sleep Record Schema");
                println!();
                println!("Required fields:");
                println!("  - date: RFC 3339 timestamp (the wake-up morning)");
                println!("  - bedTime, wakeTime: wall-clock HH:MM");
                println!("  - duration: hours slept, in 0.5 steps");
                println!("  - quality: integer 1-10");
                println!();
                println!("Optional fields:");
                println!("  - interruptions: integer");
                println!("  - feltRested: boolean");
                println!("  - notes: string (max 1000 chars)");
                println!();
                println!("Accepted containers: bare JSON array, or API envelope {{ \"data\": [...] }}");
            }
        }
        SchemaKind::Report => {
            if json_schema {
                println!("{}", get_report_json_schema());
            } else {
                println!("Report Schema: {}", REPORT_SCHEMA_VERSION);
                println!();
                println!("An insight report contains:");
                println!();
                println!("- schema_version, report_id, generated_at");
                println!("- producer: {{ name, version }}");
                println!("- stats: phase counts and overall/recent intensity averages");
                println!("- sleep_stats: duration, quality, and interruption averages");
                println!("- episodes: per-phase episode counts and mean durations in days");
                println!("- frequency: ranked trigger percentages and symptom rates");
                println!("- seasons: per-season phase counts with the dominant phase");
                println!("- sleep_correlation: poor-sleep/depressive and good-sleep/stable links");
                println!("- patterns: weekly pattern messages with severity");
                println!("- warnings: early-warning alerts with severity and recommendations");
                println!("- mood_timeline: one point per day over the last 30 days");
                println!("- sleep_timeline: one point per day over the last 14 days");
            }
        }
    }

    Ok(())
}

fn cmd_doctor(
    journal: Option<&std::path::Path>,
    sleep: Option<&std::path::Path>,
    json: bool,
) -> Result<(), MoodlensCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "moodlens_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Moodlens version {}", MOODLENS_VERSION),
    });

    checks.push(DoctorCheck {
        name: "report_schema".to_string(),
        status: CheckStatus::Ok,
        message: format!("Report schema: {}", REPORT_SCHEMA_VERSION),
    });

    if let Some(journal_path) = journal {
        checks.push(check_records_file("journal", journal_path, |content| {
            let entries = JournalAdapter::parse_entries(content)?;
            Ok((entries.len(), JournalAdapter::validate_entries(&entries)))
        }));
    }

    if let Some(sleep_path) = sleep {
        checks.push(check_records_file("sleep_log", sleep_path, |content| {
            let records = JournalAdapter::parse_sleep(content)?;
            Ok((records.len(), JournalAdapter::validate_sleep(&records)))
        }));
    }

    // Note whether input can be piped in
    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (piped input ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: MOODLENS_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Moodlens Doctor Report");
        println!("======================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(MoodlensCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

// Helper functions

fn read_input(input: &PathBuf) -> Result<String, MoodlensCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn check_records_file<F>(name: &str, path: &std::path::Path, parse: F) -> DoctorCheck
where
    F: Fn(&str) -> Result<(usize, Vec<RecordIssue>), AnalysisError>,
{
    if !path.exists() {
        return DoctorCheck {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: format!("File {} does not exist", path.display()),
        };
    }

    match fs::read_to_string(path) {
        Ok(content) => match parse(&content) {
            Ok((count, issues)) => {
                if issues.is_empty() {
                    DoctorCheck {
                        name: name.to_string(),
                        status: CheckStatus::Ok,
                        message: format!("{} records, all clean", count),
                    }
                } else {
                    DoctorCheck {
                        name: name.to_string(),
                        status: CheckStatus::Warning,
                        message: format!("{} records, {} validation issues", count, issues.len()),
                    }
                }
            }
            Err(e) => DoctorCheck {
                name: name.to_string(),
                status: CheckStatus::Error,
                message: format!("Cannot parse records: {}", e),
            },
        },
        Err(e) => DoctorCheck {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: format!("Cannot read file: {}", e),
        },
    }
}

fn get_mood_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "mood entry",
        "description": "Moodlens journal mood entry",
        "type": "object",
        "required": ["date", "mood", "intensity"],
        "properties": {
            "_id": { "type": "string" },
            "date": { "type": "string", "format": "date-time" },
            "mood": {
                "type": "string",
                "enum": ["depressive", "interfase", "manic"]
            },
            "intensity": { "type": "integer", "minimum": 1, "maximum": 10 },
            "aggressiveness": { "type": "integer", "minimum": 1, "maximum": 10 },
            "irritability": { "type": "integer", "minimum": 1, "maximum": 10 },
            "moodStability": { "type": "boolean" },
            "depressiveSymptoms": {
                "type": "object",
                "properties": {
                    "insomnia": { "type": "boolean" },
                    "oversleeping": { "type": "boolean" },
                    "energyLoss": { "type": "boolean" },
                    "lossOfInterest": { "type": "boolean" },
                    "suicidalThoughts": { "type": "boolean" },
                    "appetiteChanges": { "type": "boolean" }
                }
            },
            "manicSymptoms": {
                "type": "object",
                "properties": {
                    "reducedSleep": { "type": "boolean" },
                    "rapidSpeech": { "type": "boolean" },
                    "racingThoughts": { "type": "boolean" },
                    "impulsivity": { "type": "boolean" },
                    "excessiveSpending": { "type": "boolean" }
                }
            },
            "triggers": {
                "type": "object",
                "properties": {
                    "stress": { "type": "boolean" },
                    "lackOfSleep": { "type": "boolean" },
                    "conflict": { "type": "boolean" },
                    "alcohol": { "type": "boolean" },
                    "seasonalChanges": { "type": "boolean" }
                }
            },
            "notes": { "type": "string", "maxLength": 1000 },
            "voiceNote": { "type": "string" }
        }
    })
    .to_string()
}

fn get_sleep_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "sleep record",
        "description": "Moodlens journal sleep record",
        "type": "object",
        "required": ["date", "bedTime", "wakeTime", "duration", "quality"],
        "properties": {
            "_id": { "type": "string" },
            "date": { "type": "string", "format": "date-time" },
            "bedTime": { "type": "string", "pattern": "^\\d{2}:\\d{2}$" },
            "wakeTime": { "type": "string", "pattern": "^\\d{2}:\\d{2}$" },
            "duration": { "type": "number", "minimum": 0, "maximum": 24 },
            "quality": { "type": "integer", "minimum": 1, "maximum": 10 },
            "interruptions": { "type": "integer", "minimum": 0 },
            "feltRested": { "type": "boolean" },
            "notes": { "type": "string", "maxLength": 1000 }
        }
    })
    .to_string()
}

fn get_report_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": REPORT_SCHEMA_VERSION,
        "description": "Moodlens insight report",
        "type": "object",
        "required": [
            "schema_version", "report_id", "generated_at", "producer",
            "stats", "sleep_stats", "episodes", "frequency", "seasons",
            "sleep_correlation", "patterns", "warnings",
            "mood_timeline", "sleep_timeline"
        ],
        "properties": {
            "schema_version": { "type": "string", "const": REPORT_SCHEMA_VERSION },
            "report_id": { "type": "string" },
            "generated_at": { "type": "string", "format": "date-time" },
            "producer": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "version": { "type": "string" }
                }
            },
            "stats": { "type": "object" },
            "sleep_stats": { "type": "object" },
            "episodes": { "type": "object" },
            "frequency": { "type": "object" },
            "seasons": { "type": "array", "items": { "type": "object" } },
            "sleep_correlation": { "type": "object" },
            "patterns": { "type": "array", "items": { "type": "object" } },
            "warnings": { "type": "array", "items": { "type": "object" } },
            "mood_timeline": { "type": "array", "items": { "type": "object" } },
            "sleep_timeline": { "type": "array", "items": { "type": "object" } }
        }
    })
    .to_string()
}

// Error types

#[derive(Debug)]
enum MoodlensCliError {
    Io(io::Error),
    Analysis(AnalysisError),
    Json(serde_json::Error),
    ValidationFailed(usize),
    DoctorFailed,
}

impl From<io::Error> for MoodlensCliError {
    fn from(e: io::Error) -> Self {
        MoodlensCliError::Io(e)
    }
}

impl From<AnalysisError> for MoodlensCliError {
    fn from(e: AnalysisError) -> Self {
        MoodlensCliError::Analysis(e)
    }
}

impl From<serde_json::Error> for MoodlensCliError {
    fn from(e: serde_json::Error) -> Self {
        MoodlensCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<MoodlensCliError> for CliError {
    fn from(e: MoodlensCliError) -> Self {
        match e {
            MoodlensCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            MoodlensCliError::Analysis(e) => CliError {
                code: "ANALYSIS_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Ensure input matches the journal record format".to_string()),
            },
            MoodlensCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            MoodlensCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} records failed validation", count),
                hint: Some("Fix the flagged records and retry".to_string()),
            },
            MoodlensCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_records: usize,
    clean_records: usize,
    flagged_records: usize,
    issues: Vec<RecordIssue>,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
