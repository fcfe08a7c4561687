use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use evenodd::config::Config;
use evenodd::input::InputOptions;
use evenodd::output::ScoredRespondent;
use evenodd::scoring::{FactorLengths, ScoreRecord};

const EXIT_SUCCESS: i32 = 0;
const EXIT_IO: i32 = 2;
const EXIT_SCORING: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// CSV file with one respondent per row and one item per column
    file: PathBuf,

    /// Comma separated factor lengths, e.g. "5,5,4" (overrides config)
    #[arg(short, long)]
    factors: Option<String>,

    /// Include the number of valid even/odd pairs per respondent
    #[arg(short, long, conflicts_with = "no_diag")]
    diag: bool,

    /// Leave out valid pair counts even when the config enables them
    #[arg(long)]
    no_diag: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write results to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Cell value to read as missing (repeatable; replaces configured tokens)
    #[arg(long = "na")]
    na: Vec<String>,

    /// Column holding respondent identifiers
    #[arg(long)]
    id_column: Option<String>,

    /// The first row is data, not column names
    #[arg(long)]
    no_headers: bool,

    /// Field delimiter
    #[arg(long)]
    delimiter: Option<char>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score every respondent
    Score {
        #[command(flatten)]
        run: RunArgs,

        /// Mark respondents scoring below this value
        #[arg(short, long, allow_negative_numbers = true)]
        threshold: Option<f64>,
    },
    /// List only respondents scoring below a threshold
    Flag {
        #[command(flatten)]
        run: RunArgs,

        /// Cutoff; respondents strictly below it are listed (overrides config)
        #[arg(short, long, allow_negative_numbers = true)]
        threshold: Option<f64>,

        /// Also list respondents whose score could not be computed
        #[arg(long)]
        include_missing: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "evenodd")]
#[command(about = "Even-odd consistency index for careless responding screens", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/evenodd/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    evenodd::logging::init(cli.verbose);
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match evenodd::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = evenodd::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let (run, threshold, flag_only, include_missing) = match cli.command {
        Commands::Score { run, threshold } => (run, threshold.or(config.threshold), false, false),
        Commands::Flag {
            run,
            threshold,
            include_missing,
        } => (run, threshold.or(config.threshold), true, include_missing),
    };

    if let Some(t) = threshold {
        if !(-1.0..=1.0).contains(&t) {
            eprintln!("Threshold {} is outside [-1, 1].", t);
            std::process::exit(EXIT_CONFIG);
        }
    } else if flag_only {
        eprintln!("No threshold given. Pass --threshold or set `threshold` in the config file.");
        std::process::exit(EXIT_CONFIG);
    }

    let factors = match resolve_factors(&run, &config) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let options = match resolve_input_options(&run, &config) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let dataset = match evenodd::input::load_responses(&run.file, &options) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Failed to read {}: {}", run.file.display(), e);
            std::process::exit(EXIT_IO);
        }
    };

    tracing::info!(
        respondents = dataset.matrix.rows(),
        items = dataset.items.len(),
        factors = ?factors.as_slice(),
        "scoring"
    );

    let records = match evenodd::scoring::score_records(&dataset.matrix, &factors) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Scoring error: {}", e);
            std::process::exit(EXIT_SCORING);
        }
    };

    let diagnostics = resolve_diagnostics(&run, &config);
    let flagged = threshold
        .map(|t| evenodd::scoring::flag_below(&records, t, include_missing))
        .unwrap_or_default();

    let rows = build_rows(
        &dataset.ids,
        &records,
        diagnostics,
        threshold.is_some().then_some(flagged.as_slice()),
        flag_only,
    );

    let rendered = match run.format {
        OutputFormat::Table => {
            let use_colors = run.output.is_none() && evenodd::output::should_use_colors();
            evenodd::output::format_table(&rows, use_colors)
        }
        OutputFormat::Tsv => evenodd::output::format_tsv(&rows),
        OutputFormat::Json => match evenodd::output::format_json(&rows) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Failed to serialize results: {}", e);
                std::process::exit(EXIT_IO);
            }
        },
    };

    match run.output {
        Some(ref path) => {
            if let Err(e) = evenodd::output::write_output(path, &rendered) {
                eprintln!("{:#}", e);
                std::process::exit(EXIT_IO);
            }
            if cli.verbose {
                eprintln!("Wrote {} rows to {}", rows.len(), path.display());
            }
        }
        None => println!("{}", rendered),
    }

    let summary = evenodd::scoring::summarize(&records, &flagged);
    tracing::info!(
        respondents = summary.respondents,
        scored = summary.scored,
        missing = summary.missing,
        flagged = summary.flagged,
        mean_score = ?summary.mean_score,
        elapsed = ?start_time.elapsed(),
        "done"
    );

    std::process::exit(EXIT_SUCCESS);
}

fn resolve_factors(run: &RunArgs, config: &Config) -> anyhow::Result<FactorLengths> {
    match (&run.factors, &config.factors) {
        (Some(s), _) => FactorLengths::parse(s),
        (None, Some(lengths)) => Ok(FactorLengths::new(lengths.clone())),
        (None, None) => anyhow::bail!(
            "No factors configured. Pass --factors (e.g. --factors 5,5) or add to the config file:\n  factors: [5, 5]"
        ),
    }
}

/// `--diag` and `--no-diag` win over the config's `diagnostics`.
fn resolve_diagnostics(run: &RunArgs, config: &Config) -> bool {
    if run.no_diag {
        false
    } else {
        run.diag || config.diagnostics.unwrap_or(false)
    }
}

fn resolve_input_options(run: &RunArgs, config: &Config) -> anyhow::Result<InputOptions> {
    let mut options = config
        .input
        .as_ref()
        .map(InputOptions::from)
        .unwrap_or_default();

    if let Some(c) = run.delimiter {
        if !c.is_ascii() {
            anyhow::bail!("Delimiter '{}' must be a single ASCII character", c);
        }
        options.delimiter = c as u8;
    }
    if run.no_headers {
        options.has_headers = false;
    }
    if run.id_column.is_some() {
        options.id_column = run.id_column.clone();
    }
    if !run.na.is_empty() {
        options.missing = run.na.clone();
    }
    Ok(options)
}

/// Pair each record with its id. `flagged` holds sorted indices when a
/// threshold is active; `flag_only` keeps just those rows.
fn build_rows<'a>(
    ids: &'a [String],
    records: &[ScoreRecord],
    diagnostics: bool,
    flagged: Option<&[usize]>,
    flag_only: bool,
) -> Vec<ScoredRespondent<'a>> {
    ids.iter()
        .zip(records)
        .enumerate()
        .filter_map(|(i, (id, record))| {
            let row = ScoredRespondent::new(i + 1, id, record, diagnostics);
            match flagged {
                Some(flagged) => {
                    let is_flagged = flagged.binary_search(&i).is_ok();
                    if flag_only && !is_flagged {
                        None
                    } else {
                        Some(row.with_flag(is_flagged))
                    }
                }
                None => Some(row),
            }
        })
        .collect()
}
