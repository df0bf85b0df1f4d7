mod ui;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use passlab::config::ServerConfig;
use passlab::generator::{DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH};
use passlab::{generate_wordlist, server, EngineChoice, GenerateOptions, StrengthReport};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, IsTerminal, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

#[derive(Parser)]
#[command(
    name = "passlab",
    version,
    author,
    about = "Password strength analyzer and seed-based wordlist generator"
)]
struct Cli {
    /// Print only the essentials
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze password strength
    Analyze(AnalyzeArgs),
    /// Generate a wordlist from seed words
    Generate(GenerateArgs),
    /// Serve the JSON API
    Serve(ServeArgs),
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
enum EngineArg {
    Auto,
    Entropy,
}

impl From<EngineArg> for EngineChoice {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Auto => EngineChoice::Auto,
            EngineArg::Entropy => EngineChoice::Entropy,
        }
    }
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Password to analyze (prompted without echo when omitted)
    #[arg(short, long, conflicts_with = "file")]
    password: Option<String>,

    /// File with one password per line
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Prompt for passwords until a blank line
    #[arg(short, long, conflicts_with_all = ["password", "file"])]
    interactive: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// Write the JSON report to a file instead of printing it
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Comma-separated personal words (name, pet, ...) to penalize
    #[arg(long, value_delimiter = ',')]
    user_inputs: Vec<String>,

    #[arg(short, long, value_enum, default_value = "auto")]
    engine: EngineArg,
}

#[derive(Args)]
struct GenerateArgs {
    /// Comma-separated seed words
    #[arg(long, conflicts_with = "from_file")]
    seeds: Option<String>,

    /// File with one seed per line
    #[arg(long)]
    from_file: Option<PathBuf>,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    pet: Option<String>,

    #[arg(long)]
    year: Option<u16>,

    /// Maximum number of words to emit
    #[arg(short = 'n', long)]
    target: Option<usize>,

    #[arg(long, default_value_t = DEFAULT_MIN_LENGTH)]
    min_length: usize,

    #[arg(long, default_value_t = DEFAULT_MAX_LENGTH)]
    max_length: usize,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Emit a JSON array instead of one word per line
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ServeArgs {
    /// Listen address, overrides PASSLAB_BIND
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Overrides PASSLAB_ENGINE
    #[arg(short, long, value_enum)]
    engine: Option<EngineArg>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = ui::DisplayOptions::detect(cli.quiet);

    match cli.command {
        Command::Analyze(args) => {
            init_tracing("warn", cli.verbose);
            run_analyze(args, &options)
        }
        Command::Generate(args) => {
            init_tracing("warn", cli.verbose);
            run_generate(args, &options)
        }
        Command::Serve(args) => {
            let mut config = ServerConfig::from_env();
            init_tracing(&config.log_level, cli.verbose);

            if let Some(bind) = args.bind {
                config.bind = bind;
            }
            if let Some(engine) = args.engine {
                config.engine = engine.into();
            }

            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("Failed to start async runtime")?
                .block_on(server::serve(config))
        }
    }
}

/// `PASSLAB_LOG` wins over `default`; `--verbose` wins over both.
fn init_tracing(default: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        std::env::var("PASSLAB_LOG")
            .ok()
            .and_then(|v| EnvFilter::try_new(v).ok())
            .unwrap_or_else(|| EnvFilter::new(default))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[derive(Serialize)]
struct LineReport<'a> {
    line: usize,
    analysis: &'a StrengthReport,
}

fn run_analyze(mut args: AnalyzeArgs, options: &ui::DisplayOptions) -> Result<()> {
    let user_inputs: Vec<String> = args
        .user_inputs
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    let analyzer = EngineChoice::from(args.engine).analyzer(user_inputs);

    if let Some(path) = &args.file {
        let contents = Zeroizing::new(
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read password file {}", path.display()))?,
        );

        let reports: Vec<(usize, StrengthReport)> = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| (i + 1, analyzer.analyze(line)))
            .collect();
        info!(count = reports.len(), "passwords analyzed");
        return emit_reports(&reports, &args, options);
    }

    if args.interactive {
        let passwords = if io::stdin().is_terminal() {
            if !options.quiet {
                eprintln!("Enter passwords, blank line to finish.");
            }
            ui::prompt_until_blank()?
        } else {
            ui::read_until_blank(io::stdin().lock())?
        };

        let reports: Vec<(usize, StrengthReport)> = passwords
            .iter()
            .enumerate()
            .map(|(i, password)| (i + 1, analyzer.analyze(password)))
            .collect();
        info!(count = reports.len(), "passwords analyzed");
        return emit_reports(&reports, &args, options);
    }

    let password = match args.password.take() {
        Some(p) => Zeroizing::new(p),
        None => ui::prompt_password("Password: ")?,
    };

    let report = analyzer.analyze(&password);
    debug!("password analyzed");

    if let Some(out) = &args.out {
        return write_json(out, &report, options);
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        ui::display_report(0, &report, options);
    }

    Ok(())
}

/// Numbered reports: `line` is the file line or the entry number.
fn emit_reports(
    reports: &[(usize, StrengthReport)],
    args: &AnalyzeArgs,
    options: &ui::DisplayOptions,
) -> Result<()> {
    let lines: Vec<LineReport<'_>> = reports
        .iter()
        .map(|(line, analysis)| LineReport {
            line: *line,
            analysis,
        })
        .collect();

    if let Some(out) = &args.out {
        return write_json(out, &lines, options);
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        for (line, report) in reports {
            ui::display_report(*line, report, options);
        }
    }
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
    options: &ui::DisplayOptions,
) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writeln!(writer)?;
    writer.flush()?;

    if !options.quiet {
        eprintln!("Report written to {}", path.display());
    }
    Ok(())
}

fn collect_seeds(args: &GenerateArgs) -> Result<Vec<String>> {
    let mut seeds: Vec<String> = if let Some(path) = &args.from_file {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?
            .lines()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    } else if let Some(joined) = &args.seeds {
        joined
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        Vec::new()
    };

    seeds.extend(args.name.clone());
    seeds.extend(args.pet.clone());
    seeds.extend(args.year.map(|y| y.to_string()));

    Ok(seeds)
}

fn run_generate(args: GenerateArgs, options: &ui::DisplayOptions) -> Result<()> {
    let seeds = collect_seeds(&args)?;
    let generate_options = GenerateOptions {
        target: args.target,
        min_length: args.min_length,
        max_length: args.max_length,
    };

    let (words, elapsed) = ui::show_progress(options, || {
        generate_wordlist(&seeds, &generate_options).context("Invalid generation request")
    })?;
    info!(seeds = seeds.len(), words = words.len(), "wordlist generated");

    match &args.out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_words(BufWriter::new(file), &words, args.json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => write_words(io::stdout().lock(), &words, args.json)
            .context("Failed to write wordlist")?,
    }

    ui::display_generation_summary(
        &ui::GenerationSummary {
            seed_count: seeds.len(),
            word_count: words.len(),
            target: args.target,
            min_length: args.min_length,
            max_length: args.max_length,
            out: args.out.as_deref(),
            elapsed,
        },
        options,
    )
}

fn write_words<W: Write>(mut writer: W, words: &passlab::Wordlist, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut writer, words)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    } else {
        words.write_to(writer)?;
    }
    Ok(())
}
