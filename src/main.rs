use clap::{Parser as ClapParser, Subcommand};
use rule_lang::EngineConfig;
use rule_lang::cli::{self, CheckOptions, CheckResult, CliError};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(ClapParser)]
#[command(name = "rule")]
#[command(about = "Evaluate JavaScript-flavored business rules against JSON variables")]
#[command(version)]
struct Cli {
    /// Log engine activity (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and evaluate a rule
    Check {
        /// The rule to evaluate
        rule: String,

        /// JSON object of variables (reads from stdin if not provided)
        #[arg(long)]
        vars: Option<String>,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,

        /// Print the boolean algebra the rule reduced to
        #[arg(long)]
        explain: bool,

        /// JSON file with engine limits
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the token stream of a rule
    Tokens {
        /// The rule to tokenize
        rule: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let result = match cli.command {
        Commands::Check {
            rule,
            vars,
            syntax_only,
            explain,
            config,
        } => run_check(rule, vars, syntax_only, explain, config),
        Commands::Tokens { rule } => {
            for line in cli::execute_tokens(&rule, &EngineConfig::default()) {
                println!("{}", line);
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<PathBuf>) -> Result<EngineConfig, CliError> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)?;
            EngineConfig::from_json(&json).map_err(CliError::Config)
        }
        None => Ok(EngineConfig::default()),
    }
}

fn run_check(
    rule: String,
    vars: Option<String>,
    syntax_only: bool,
    explain: bool,
    config: Option<PathBuf>,
) -> Result<(), CliError> {
    let vars = match vars {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = CheckOptions {
        rule,
        vars,
        syntax_only,
        explain,
        config: load_config(config)?,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Verdict(verdict) => println!("{}", verdict),
        CheckResult::Explained { algebra, verdict } => println!("{} => {}", algebra, verdict),
    }
    Ok(())
}
