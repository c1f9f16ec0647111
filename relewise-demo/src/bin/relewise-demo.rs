//! relewise-demo CLI - run one demo request and print what it logged
//!
//! Usage:
//!   relewise-demo [--example <ID>] [--file <PATH>] [OPTIONS]
//!
//! Example:
//!   relewise-demo --example product-search -d <dataset> -k <key> -s https://api.relewise.com
//!   RELEWISE_API_KEY=... relewise-demo --file src/search-term-prediction.ts

use anyhow::{Context, Result};
use colored::Colorize;
use relewise_demo::capture::{capture, format_error, NullLogger, RunLogger, TracingLogger};
use relewise_demo::example::{ExampleId, ExampleParams};
use relewise_demo::scenario::{product_search_request, search_term_prediction_request};
use relewise_demo::{DemoConfig, HttpConnector, RunOptions};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const DEFAULT_CONFIG_PATH: &str = "relewise-demo.toml";

fn print_usage() {
    eprintln!(
        r#"
{} - Run a Relewise demo request and print the response

{}
    relewise-demo [OPTIONS]

{}
    -e, --example <ID>          Example to run: {}
    -f, --file <PATH>           Derive the example from a file name (e.g. src/product-search.ts)
    -d, --dataset-id <ID>       Dataset ID (or RELEWISE_DATASET_ID)
    -k, --api-key <KEY>         API key (or RELEWISE_API_KEY)
    -s, --server-url <URL>      Server URL (or RELEWISE_SERVER_URL)
    -c, --config <PATH>         Config file (default: {})
    -v, --verbose               Show client debug logging
    --dry-run                   Print the request body without sending it
    -h, --help                  Print this help message
"#,
        "relewise-demo".bold(),
        "USAGE:".bold(),
        "OPTIONS:".bold(),
        ExampleId::ALL.map(|id| id.as_str()).join(", "),
        DEFAULT_CONFIG_PATH,
    );
}

struct CliArgs {
    params: ExampleParams,
    dataset_id: Option<String>,
    api_key: Option<String>,
    server_url: Option<String>,
    config: PathBuf,
    verbose: bool,
    dry_run: bool,
}

fn parse_args() -> Result<CliArgs> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        std::process::exit(0);
    }

    let mut cli = CliArgs {
        params: ExampleParams::default(),
        dataset_id: None,
        api_key: None,
        server_url: None,
        config: PathBuf::from(DEFAULT_CONFIG_PATH),
        verbose: false,
        dry_run: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        let mut value = |name: &str| next_value(&mut iter, name);
        match arg.as_str() {
            "--example" | "-e" => cli.params.example = Some(value(arg.as_str())?),
            "--file" | "-f" => cli.params.file = Some(value(arg.as_str())?),
            "--dataset-id" | "-d" => cli.dataset_id = Some(value(arg.as_str())?),
            "--api-key" | "-k" => cli.api_key = Some(value(arg.as_str())?),
            "--server-url" | "-s" => cli.server_url = Some(value(arg.as_str())?),
            "--config" | "-c" => cli.config = PathBuf::from(value(arg.as_str())?),
            "--verbose" | "-v" => cli.verbose = true,
            "--dry-run" => cli.dry_run = true,
            other => {
                print_usage();
                anyhow::bail!("Unknown argument: {}", other);
            }
        }
    }

    Ok(cli)
}

fn next_value(iter: &mut impl Iterator<Item = String>, name: &str) -> Result<String> {
    iter.next()
        .with_context(|| format!("{} requires a value", name))
}

fn print_header(example: ExampleId, options: &RunOptions) {
    let shown = |value: &Option<String>| value.clone().unwrap_or_else(|| "(missing)".to_string());

    eprintln!();
    eprintln!("{}  {}", "Example:".dimmed(), example.label().bold());
    eprintln!("{}  {}", "Dataset:".dimmed(), shown(&options.dataset_id));
    eprintln!(
        "{}  {}",
        "API key:".dimmed(),
        if options.api_key.as_deref().is_some_and(|k| !k.is_empty()) {
            "********".to_string()
        } else {
            "(missing)".to_string()
        }
    );
    eprintln!("{}   {}", "Server:".dimmed(), shown(&options.server_url));
    eprintln!();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args()?;

    let config = DemoConfig::load(&args.config)
        .with_context(|| format!("Failed to load config: {}", args.config.display()))?
        .with_env_overrides();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let example = args.params.resolve();
    if let Some(requested) = args.params.requested() {
        if requested != example.as_str() {
            eprintln!(
                "{} unknown example '{}', using {}",
                "Warning:".yellow(),
                requested,
                example
            );
        }
    }

    let options = RunOptions {
        dataset_id: args.dataset_id.or(config.defaults.dataset_id.clone()),
        api_key: args.api_key.or(config.defaults.api_key.clone()),
        server_url: args.server_url.or(config.defaults.server_url.clone()),
    };

    print_header(example, &options);

    if args.dry_run {
        let body = match example {
            ExampleId::ProductSearch => serde_json::to_string_pretty(&product_search_request())?,
            ExampleId::SearchTermPrediction => {
                serde_json::to_string_pretty(&search_term_prediction_request())?
            }
        };
        eprintln!("{}", "DRY RUN - request body:".yellow());
        println!("{}", body);
        return Ok(());
    }

    let connector = HttpConnector::new(config.request_timeout());
    // Stdout already shows the captured lines; only echo them to tracing when verbose
    let forward: Arc<dyn RunLogger> = if args.verbose {
        Arc::new(TracingLogger)
    } else {
        Arc::new(NullLogger)
    };

    let (result, lines) = capture(forward, |logger| {
        let connector = &connector;
        let options = &options;
        async move { example.run(connector, options, logger.as_ref()).await }
    })
    .await;

    for line in &lines {
        println!("{}", line);
    }

    if let Err(e) = result {
        eprintln!("{}", format_error(&e).red().bold());
        std::process::exit(1);
    }

    Ok(())
}
