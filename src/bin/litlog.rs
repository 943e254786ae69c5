//! Command-line interface for litlog
//!
//! Usage:
//!   litlog json   --input `<path>` [--output `<path>`]   - Parse a log into indented JSON
//!   litlog html   --input `<path>` [--output `<path>`]   - Render a searchable HTML report
//!   litlog tokens --input `<path>` [--output `<path>`]   - Dump raw tokens as JSON lines (alias: generate)
//!   litlog list-formats                                   - List available output formats
//!
//! Configuration layers, later ones win: built-in defaults, `litlog.toml` in the working
//! directory if present, `--config <file>`, `LITLOG_*` environment variables (e.g.
//! `LITLOG_REPORT__TITLE="Nightly"`), then `--max-depth`.
//! `-v/--verbose` turns on debug logging (RUST_LOG takes precedence).

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use litlog::litlog::config::Loader;
use litlog::litlog::processor::{OutputFormat, ProcessingError, Processor};
use std::fs;
use tracing_subscriber::EnvFilter;

const LOCAL_CONFIG: &str = "litlog.toml";

fn io_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .help("Path to the log file to read")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Path to write to (defaults to stdout)"),
        )
}

fn cli() -> Command {
    Command::new("litlog")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert literal-syntax value logs into JSON and HTML reports")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .global(true)
                .value_parser(value_parser!(u32))
                .help("Deepest collection nesting accepted before parsing fails"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging on stderr"),
        )
        .subcommand(io_args(
            Command::new("json").about("Parse the input and write it as indented JSON"),
        ))
        .subcommand(io_args(
            Command::new("html").about("Parse the input and write a searchable HTML report"),
        ))
        .subcommand(io_args(
            Command::new("tokens")
                .visible_alias("generate")
                .about("Write every lexer token as one JSON record per line"),
        ))
        .subcommand(Command::new("list-formats").about("List available output formats"))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let matches = cli().get_matches();
    let verbose = matches.get_flag("verbose")
        || matches
            .subcommand()
            .is_some_and(|(_, sub_matches)| sub_matches.get_flag("verbose"));
    init_tracing(verbose);

    let result = match matches.subcommand() {
        Some(("list-formats", _)) => {
            handle_list_formats_command();
            Ok(())
        }
        Some((name, sub_matches)) => handle_convert_command(name, &matches, sub_matches),
        None => unreachable!(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Handle json, html and tokens
fn handle_convert_command(
    name: &str,
    matches: &ArgMatches,
    sub_matches: &ArgMatches,
) -> Result<(), ProcessingError> {
    let format = OutputFormat::from_string(name)?;

    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = sub_matches
        .get_one::<String>("config")
        .or_else(|| matches.get_one::<String>("config"))
    {
        loader = loader.with_file(path);
    }
    loader = loader.with_env();
    if let Some(depth) = sub_matches
        .get_one::<u32>("max-depth")
        .or_else(|| matches.get_one::<u32>("max-depth"))
    {
        loader = loader.set_override("parse.max_depth", i64::from(*depth))?;
    }
    let config = loader.build()?;

    let input = sub_matches
        .get_one::<String>("input")
        .ok_or_else(|| ProcessingError::Config("--input is required".to_string()))?;
    let output = Processor::new(&config).process_file(input, format)?;

    match sub_matches.get_one::<String>("output") {
        Some(path) => {
            fs::write(path, output).map_err(|e| ProcessingError::Io {
                path: path.clone(),
                message: e.to_string(),
            })?;
            tracing::info!(%path, %format, "wrote output");
        }
        None => print!("{}", output),
    }
    Ok(())
}

fn handle_list_formats_command() {
    println!("Available output formats:\n");
    for format in OutputFormat::available() {
        let description = match format {
            OutputFormat::Json => "Value tree as indented JSON",
            OutputFormat::Html => "Searchable HTML report of log entries",
            OutputFormat::Tokens => "Raw lexer tokens, one JSON record per line",
        };
        println!("  {:<8} {}", format.name(), description);
    }
}
