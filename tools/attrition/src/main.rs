use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use attrition_ai::{DecisionThreshold, Predictor};
use attrition_features::{Department, RawInputRecord, SalaryLevel};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

mod config;
mod render;

use config::{Config, ConfigError, CONFIG_FILE, ENV_THRESHOLD};
use render::{render_check, render_json, render_text, PredictionReport};

/// Prediction could not be produced for this request
const EXIT_REQUEST: i32 = 1;
/// Configuration or artifacts unusable; nothing can be served
const EXIT_STARTUP: i32 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "attrition",
    version,
    about = "Predict employee attrition risk with a pre-trained classifier",
    long_about = "attrition scores an employee's attributes with a pre-trained attrition classifier\n\
        and reports a High/Low risk label, the probability of leaving, retention guidance\n\
        and a summary of the submitted values.\n\n\
        EXAMPLES:\n\
        \n  attrition predict --satisfaction 20 --evaluation 70 --department it --salary high\n\
        \n  attrition predict --input employee.json --json\n\
        \n  echo '{...}' | attrition predict --input -\n\
        \n  attrition check --config deploy/attrition.toml",
    after_help = "Artifacts are located via --classifier/--schema, ATTRITION_CLASSIFIER/ATTRITION_SCHEMA,\n\
        or the [artifacts] table of attrition.toml."
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./attrition.toml when present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Serialized classifier artifact
    #[arg(long, value_name = "FILE", global = true)]
    classifier: Option<PathBuf>,

    /// JSON list of the classifier's training columns
    #[arg(long, value_name = "FILE", global = true)]
    schema: Option<PathBuf>,

    /// Probability at or above which the label is High (default 0.30)
    #[arg(long, value_name = "P", global = true, value_parser = parse_threshold)]
    threshold: Option<DecisionThreshold>,

    /// Warn instead of failing when the schema lacks a department or salary column
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Assess one employee
    #[command(
        about = "Assess the attrition risk of one employee",
        long_about = "Encodes the employee's attributes in the classifier's column order, scores them\n\
            and prints the risk label, probability, guidance and an input summary.\n\n\
            Attributes come from flags (defaults match a blank form) or from a JSON record\n\
            given with --input."
    )]
    Predict(PredictArgs),

    /// Load and validate the artifacts without scoring anything
    Check,

    /// Print the schema columns in classifier order
    Schema,

    /// Print the effective configuration as TOML
    Config,
}

#[derive(Debug, Args, Clone)]
struct PredictArgs {
    /// Satisfaction level in percent
    #[arg(
        long,
        value_name = "PCT",
        default_value_t = 20,
        value_parser = clap::value_parser!(u32).range(0..=100)
    )]
    satisfaction: u32,

    /// Last performance evaluation in percent
    #[arg(
        long,
        value_name = "PCT",
        default_value_t = 70,
        value_parser = clap::value_parser!(u32).range(0..=100)
    )]
    evaluation: u32,

    /// Number of projects
    #[arg(
        long,
        value_name = "N",
        default_value_t = 4,
        value_parser = clap::value_parser!(u32).range(1..=10)
    )]
    projects: u32,

    /// Department (e.g. it, research-development, sales)
    #[arg(long, value_name = "DEPT", default_value = "it")]
    department: Department,

    /// Salary level (high, medium, low)
    #[arg(long, value_name = "LEVEL", default_value = "high")]
    salary: SalaryLevel,

    /// Years at the company
    #[arg(
        long,
        value_name = "YEARS",
        default_value_t = 3,
        value_parser = clap::value_parser!(u32).range(1..=10)
    )]
    years: u32,

    /// Average monthly working hours
    #[arg(
        long,
        value_name = "HOURS",
        default_value_t = 160,
        value_parser = clap::value_parser!(u32).range(50..=400)
    )]
    hours: u32,

    /// The employee had a work accident
    #[arg(long)]
    work_accident: bool,

    /// The employee was promoted in the last 5 years
    #[arg(long)]
    promotion: bool,

    /// Read the employee record as JSON from FILE ('-' for stdin)
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with_all = [
            "satisfaction", "evaluation", "projects", "department", "salary",
            "years", "hours", "work_accident", "promotion"
        ]
    )]
    input: Option<PathBuf>,

    /// Emit the result as JSON
    #[arg(long)]
    json: bool,
}

impl PredictArgs {
    fn to_record(&self) -> RawInputRecord {
        RawInputRecord {
            satisfaction_level_pct: self.satisfaction,
            last_evaluation_pct: self.evaluation,
            number_project: self.projects,
            department: self.department,
            salary: self.salary,
            time_spend_company: self.years,
            average_monthly_hours: self.hours,
            work_accident: self.work_accident,
            promotion_last_5years: self.promotion,
        }
    }
}

fn parse_threshold(s: &str) -> Result<DecisionThreshold, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    DecisionThreshold::new(value).map_err(|e| e.to_string())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

fn resolve_config(cli: &Cli) -> Result<Config, ConfigError> {
    resolve_config_with(cli, |k| std::env::var(k).ok())
}

/// defaults < config file < environment < command-line flags
fn resolve_config_with<F>(cli: &Cli, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None if Path::new(CONFIG_FILE).is_file() => Config::load(Path::new(CONFIG_FILE))?,
        None => Config::default(),
    };
    // an explicit --threshold shadows the environment entirely, even a malformed value
    let threshold_flag = cli.threshold.is_some();
    config.apply_env(|k| {
        if threshold_flag && k == ENV_THRESHOLD {
            None
        } else {
            lookup(k)
        }
    })?;
    if let Some(p) = &cli.classifier {
        config.artifacts.classifier = p.clone();
    }
    if let Some(p) = &cli.schema {
        config.artifacts.schema = p.clone();
    }
    if let Some(t) = cli.threshold {
        config.decision.threshold = t;
    }
    if cli.lenient {
        config.validation.strict_domain = false;
    }
    log::debug!("effective config: {config}");
    Ok(config)
}

fn read_record_from_input(input: &Path) -> Result<RawInputRecord, String> {
    let text = if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read from stdin: {e}"))?;
        buf
    } else {
        fs::read_to_string(input)
            .map_err(|e| format!("failed to read '{}': {e}", input.display()))?
    };
    let record = RawInputRecord::from_json_str(&text)
        .map_err(|e| format!("invalid employee record: {e}"))?;
    record.validate().map_err(|e| e.to_string())?;
    Ok(record)
}

fn start_predictor(config: &Config) -> Result<Predictor, i32> {
    Predictor::initialize(
        &config.artifact_paths(),
        config.decision.threshold,
        config.domain_policy(),
    )
    .map_err(|e| {
        eprintln!("error: {e}");
        EXIT_STARTUP
    })
}

fn run_predict(predictor: &Predictor, args: &PredictArgs) -> i32 {
    let record = match &args.input {
        Some(path) => match read_record_from_input(path) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("error: {e}");
                return EXIT_REQUEST;
            }
        },
        None => args.to_record(),
    };

    let assessment = match predictor.assess(&record) {
        Ok(a) => a,
        Err(e) => {
            log::error!("assessment failed: {e}");
            eprintln!("error: {e}");
            return EXIT_REQUEST;
        }
    };

    if args.json {
        let report = PredictionReport::new(
            predictor.classifier().name(),
            predictor.threshold(),
            &assessment,
        );
        match render_json(&report) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("error: {e}");
                return EXIT_REQUEST;
            }
        }
    } else {
        print!("{}", render_text(&assessment));
    }
    0
}

fn run_cli_with(cli: Cli) -> i32 {
    init_logging(cli.verbose);

    let config = match resolve_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return EXIT_STARTUP;
        }
    };

    match &cli.command {
        Command::Config => match config.to_toml() {
            Ok(s) => {
                print!("{s}");
                0
            }
            Err(e) => {
                eprintln!("error: {e}");
                EXIT_STARTUP
            }
        },
        Command::Check => match start_predictor(&config) {
            Ok(p) => {
                print!("{}", render_check(&p));
                0
            }
            Err(rc) => rc,
        },
        Command::Schema => match start_predictor(&config) {
            Ok(p) => {
                for (i, column) in p.schema().iter().enumerate() {
                    println!("{i:>3}  {column}");
                }
                0
            }
            Err(rc) => rc,
        },
        Command::Predict(args) => match start_predictor(&config) {
            Ok(p) => run_predict(&p, args),
            Err(rc) => rc,
        },
    }
}

fn main() {
    std::process::exit(run_cli_with(Cli::parse()));
}
