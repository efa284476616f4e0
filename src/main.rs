use clap::{Parser as ClapParser, Subcommand};
use esql_ast::cli::{self, CheckOptions, CliError, PrintOptions};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(ClapParser)]
#[command(name = "esql-ast")]
#[command(about = "Validate and print ES|QL syntax trees given as JSON")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON syntax tree
    Check {
        /// JSON tree file (reads from stdin if not provided)
        file: Option<PathBuf>,

        /// Query text the tree was parsed from, to check node locations
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a JSON syntax tree as query text
    Print {
        /// JSON tree file (reads from stdin if not provided)
        file: Option<PathBuf>,

        /// One command per line
        #[arg(short, long)]
        multiline: bool,

        /// Lowercase commands, functions and keywords
        #[arg(short, long)]
        lowercase: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { file, source, json } => run_check(file, source, json),
        Commands::Print {
            file,
            multiline,
            lowercase,
        } => run_print(file, multiline, lowercase),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(file: Option<PathBuf>, source: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let options = CheckOptions {
        ast: read_input(file)?,
        source: source.map(fs::read_to_string).transpose()?,
        json,
    };

    let result = cli::execute_check(&options)?;
    println!("{}", result.render()?);
    if !result.is_valid() {
        return Err(CliError::Invalid(result.report.errors().count()));
    }
    Ok(())
}

fn run_print(file: Option<PathBuf>, multiline: bool, lowercase: bool) -> Result<(), CliError> {
    let options = PrintOptions {
        ast: read_input(file)?,
        multiline,
        lowercase,
    };
    println!("{}", cli::execute_print(&options)?);
    Ok(())
}

fn read_input(file: Option<PathBuf>) -> Result<Option<String>, CliError> {
    match file {
        Some(path) => Ok(Some(fs::read_to_string(path)?)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}
