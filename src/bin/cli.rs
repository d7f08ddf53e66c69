use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{CommandFactory, Parser as ClapParser};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use curlgen::{
    EmissionResult, Error, ExecuteConfig, Executor, ParsedInvocation, Parser, ParserConfig,
    Registry, format_debug, format_json, format_response, format_targets,
};

/// curlgen CLI: turn a curl command into HTTP client code.
///
/// Reads a curl invocation from a file, --raw string, or stdin, and prints
/// equivalent source for the chosen targets. Multi-line commands with `\`
/// continuations are accepted.
#[derive(ClapParser)]
#[command(name = "curlgen-cli", version, about, long_about = None)]
struct Cli {
    /// Path to a file containing a curl command.
    /// Reads from stdin when neither FILE nor --raw is given.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// The curl command as a single argument.
    #[arg(long)]
    raw: Option<String>,

    /// Target to generate (repeatable). See --list-targets.
    #[arg(short, long = "target", value_name = "ID", default_value = "python")]
    targets: Vec<String>,

    /// Generate every built-in target.
    #[arg(long, conflicts_with = "targets")]
    all: bool,

    /// Output format.
    #[arg(short, long, default_value = "code", value_enum)]
    format: OutputFormat,

    /// Pretty-print JSON output (ignored for other formats).
    #[arg(short, long)]
    pretty: bool,

    /// List the available targets and exit.
    #[arg(long)]
    list_targets: bool,

    /// Also write each generated program to DIR as `request.<ext>`.
    #[arg(long, value_name = "DIR")]
    save: Option<PathBuf>,

    /// Send the request and print the response after the generated code.
    #[arg(long)]
    execute: bool,

    /// Timeout in seconds for --execute.
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Do not follow redirects with --execute.
    #[arg(long)]
    no_redirects: bool,

    /// Maximum allowed input length in bytes.
    #[arg(long, default_value = "65536")]
    max_input_len: usize,

    /// Maximum number of headers allowed.
    #[arg(long, default_value = "128")]
    max_headers: usize,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum OutputFormat {
    /// Generated source code
    Code,
    /// Parsed request as JSON
    Json,
    /// Human-readable parsed request
    Debug,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "curlgen=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let registry = Registry::builtin();

    if cli.list_targets {
        print!("{}", format_targets(registry.targets()));
        return;
    }

    // When no input source is provided and stdin is a terminal (not piped),
    // show help instead of blocking.
    if cli.file.is_none() && cli.raw.is_none() && std::io::stdin().is_terminal() {
        Cli::command().print_help().ok();
        println!();
        process::exit(0);
    }

    let input = match read_input(&cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading input: {e}");
            process::exit(1);
        }
    };

    if input.trim().is_empty() {
        eprintln!("Error: empty input");
        process::exit(1);
    }

    let config = ParserConfig {
        max_input_len: cli.max_input_len,
        max_headers: cli.max_headers,
    };

    let parsed = match Parser::with_config(config).parse(&input) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Parse error: {e}");
            process::exit(2);
        }
    };
    for token in &parsed.ignored {
        warn!(%token, "ignored unsupported argument");
    }

    match cli.format {
        OutputFormat::Json => println!("{}", format_json(&parsed, cli.pretty)),
        OutputFormat::Debug => print!("{}", format_debug(&parsed)),
        OutputFormat::Code => {
            let results = match generate(&cli, &registry, &parsed) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(3);
                }
            };
            print_results(&results);
            if let Some(dir) = &cli.save {
                if let Err(e) = save_results(dir, &results) {
                    eprintln!("Error saving output: {e}");
                    process::exit(1);
                }
            }
        }
    }

    if cli.execute {
        let config = ExecuteConfig {
            timeout: Duration::from_secs(cli.timeout),
            follow_redirects: !cli.no_redirects,
            ..ExecuteConfig::default()
        };
        if let Err(e) = run_execute(config, &parsed).await {
            // Generated code above stays valid; only the preview failed.
            eprintln!("Execution error: {e}");
            process::exit(4);
        }
    }
}

fn generate(
    cli: &Cli,
    registry: &Registry,
    parsed: &ParsedInvocation,
) -> Result<Vec<EmissionResult>, Error> {
    if cli.all {
        return Ok(registry.emit_all(&parsed.descriptor));
    }
    cli.targets
        .iter()
        .map(|id| registry.emit(&parsed.descriptor, id))
        .collect()
}

fn print_results(results: &[EmissionResult]) {
    let headed = results.len() > 1;
    for (i, result) in results.iter().enumerate() {
        if headed {
            if i > 0 {
                println!();
            }
            println!("// ---- {} ----", result.target);
        }
        print!("{}", result.code);
    }
}

/// Write each result as `request.<ext>`, prefixing the target id when two
/// targets share an extension.
fn save_results(dir: &Path, results: &[EmissionResult]) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    for result in results {
        let shared = results
            .iter()
            .filter(|r| r.extension == result.extension)
            .count()
            > 1;
        let stem = if shared {
            format!("request-{}", result.target)
        } else {
            "request".to_string()
        };
        let path = dir.join(result.file_name(&stem));
        debug!(path = %path.display(), "writing generated code");
        std::fs::write(path, &result.code)?;
    }
    Ok(())
}

async fn run_execute(
    config: ExecuteConfig,
    parsed: &ParsedInvocation,
) -> Result<(), curlgen::ExecutionError> {
    let executor = Executor::with_config(config)?;
    let cancel = CancellationToken::new();

    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let response = executor.execute(&parsed.descriptor, &cancel).await?;
    println!();
    println!("// ---- response ----");
    print!("{}", format_response(&response));
    Ok(())
}

/// Read the curl command from --raw, a file, or stdin.
fn read_input(cli: &Cli) -> Result<String, std::io::Error> {
    if let Some(raw) = &cli.raw {
        return Ok(raw.clone());
    }
    match &cli.file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
