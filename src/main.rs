use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use rox::ast_printer::AstPrinter;
use rox::parser::Parser;
use rox::scanner::Scanner;
use rox::Outcome;

/// Exit code for input that could not be read (sysexits `EX_NOINPUT`).
const EXIT_NO_INPUT: i32 = 66;

#[derive(ClapParser, Debug)]
#[command(version, about = "Rox language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to rox.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print tokens as a JSON array instead of one per line
        #[arg(long)]
        json: bool,
    },

    /// Parses input from a file and prints each statement's AST
    Parse { filename: PathBuf },

    /// Runs input from a file as a program
    Run { filename: PathBuf },
}

/// Reads the contents of a file as UTF‑8 text.
fn read_file(filename: &PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    let source = rox::source_text(&buf)
        .context(format!("File {:?} is not valid UTF-8", filename))?;

    Ok(source.to_string())
}

fn init_logger() -> Result<()> {
    let log_file = File::create("rox.log").context("Failed to create rox.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'rox::' from module path
            let module = record.module_path().unwrap_or("<unnamed>");
            let module = module.strip_prefix("rox::").unwrap_or(module);
            writeln!(
                buf,
                "[{} {}:{}] - {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // RUST_LOG overrides below
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to rox.log");
    Ok(())
}

fn tokenize(source: &str, json: bool) -> Result<i32> {
    let (tokens, errors) = Scanner::new(source).scan_all();

    for e in &errors {
        eprintln!("{}", e);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        serde_json::to_writer_pretty(&mut out, &tokens).context("Failed to encode tokens")?;
        writeln!(out)?;
    } else {
        for token in &tokens {
            writeln!(out, "{}", token)?;
        }
    }

    Ok(if errors.is_empty() { 0 } else { 65 })
}

fn parse(source: &str) -> Result<i32> {
    let (tokens, mut errors) = Scanner::new(source).scan_all();
    let (statements, parse_errors) = Parser::new(&tokens).parse();
    errors.extend(parse_errors);

    for e in &errors {
        eprintln!("{}", e);
    }

    if !errors.is_empty() {
        return Ok(65);
    }

    for stmt in &statements {
        let rendered = AstPrinter::print_stmt(stmt);
        debug!("AST: {}", rendered);
        println!("{}", rendered);
    }

    Ok(0)
}

fn run(source: &str) -> Result<i32> {
    let stdout = io::stdout();
    let outcome = rox::run_source(source, stdout.lock());

    match &outcome {
        Outcome::Ok => info!("Program executed successfully"),

        Outcome::StaticErrors(errors) => {
            for e in errors {
                eprintln!("{}", e);
            }
        }

        Outcome::RuntimeError(e) => {
            debug!("Runtime debug: {:?}", e);
            eprintln!("{}", e);
        }
    }

    Ok(outcome.exit_code())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        Builder::new().filter_level(log::LevelFilter::Off).init();
    }

    info!("CLI arguments: {:?}", args);

    let filename = match &args.commands {
        Commands::Tokenize { filename, .. }
        | Commands::Parse { filename }
        | Commands::Run { filename } => filename,
    };

    let source = match read_file(filename) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{:#}", e);
            process::exit(EXIT_NO_INPUT);
        }
    };

    let code = match &args.commands {
        Commands::Tokenize { json, .. } => tokenize(&source, *json)?,
        Commands::Parse { .. } => parse(&source)?,
        Commands::Run { .. } => run(&source)?,
    };

    debug!("Exiting with code {}", code);

    if code != 0 {
        process::exit(code);
    }

    Ok(())
}
