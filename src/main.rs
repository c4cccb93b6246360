use clap::{Parser as ClapParser, Subcommand};
use std::fs;
use std::io::{self, Read};
use weft_lang::cli::{self, CheckOptions, CheckResult, CliError, ExtractOptions};

#[derive(ClapParser)]
#[command(name = "weft")]
#[command(about = "Weft - compile named text patterns to regular expressions and extract structured values")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a pattern file
    Check {
        /// Path to the pattern source
        file: String,

        /// Only validate syntax, don't compile
        #[arg(long)]
        syntax_only: bool,
    },

    /// Compile a pattern file and print the result
    Compile {
        /// Path to the pattern source
        file: String,

        /// Print the combined alternation instead of per-name fragments
        #[arg(long)]
        all: bool,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Compile a pattern file and extract fields from input text
    Extract {
        /// Path to the pattern source
        file: String,

        /// Text input file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print token spans for a pattern file
    Highlight {
        /// Path to the pattern source
        file: String,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { file, syntax_only } => run_check(file, syntax_only),
        Commands::Compile { file, all, pretty } => run_compile(file, all, pretty),
        Commands::Extract {
            file,
            input,
            pretty,
        } => run_extract(file, input, pretty),
        Commands::Highlight { file } => run_highlight(file),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(file: String, syntax_only: bool) -> Result<(), CliError> {
    let options = CheckOptions {
        source: fs::read_to_string(file)?,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Compiled(names) => {
            println!("Compiled {} pattern(s): {}", names.len(), names.join(", "));
        }
    }
    Ok(())
}

fn run_compile(file: String, all: bool, pretty: bool) -> Result<(), CliError> {
    let source = fs::read_to_string(file)?;

    if all {
        println!("{}", weft_lang::compile_all(&source)?);
        return Ok(());
    }

    let scope = weft_lang::compile(&source)?;
    let object: serde_json::Value = scope
        .iter()
        .map(|(name, fragment)| (name.clone(), serde_json::Value::String(fragment.clone())))
        .collect::<serde_json::Map<_, _>>()
        .into();
    if pretty {
        println!(
            "{}",
            serde_json::to_string_pretty(&object).unwrap_or_else(|_| object.to_string())
        );
    } else {
        println!("{}", object);
    }
    Ok(())
}

fn run_extract(file: String, input: Option<String>, pretty: bool) -> Result<(), CliError> {
    let input = match input {
        Some(path) => Some(fs::read_to_string(path)?),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = ExtractOptions {
        source: fs::read_to_string(file)?,
        input,
        pretty,
    };

    println!("{}", cli::execute_extract(&options)?);
    Ok(())
}

fn run_highlight(file: String) -> Result<(), CliError> {
    let source = fs::read_to_string(file)?;
    println!("{}", cli::highlight_json(&source));
    Ok(())
}
