//! mc - CLI

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use mc::backends::dev::LineRepl;
use mc::frontend::{Compiler, UnitKind, UnitOutcome};
use mc::util::config::CompileConfig;
use mc::util::diagnostic::{EmitterConfig, TextEmitter};
use mc::util::logger::{self, LogLevel};
use mc::{read_source, NAME, VERSION};

/// A minimal statically-typed expression language compiled to SSA IR
#[derive(Parser, Debug)]
#[command(name = "mc")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML configuration file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Disable colored diagnostics
    #[arg(long, global = true)]
    no_color: bool,

    /// Print the IR of every compiled unit to stderr
    #[arg(long, global = true)]
    dump_ir: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a source file and print its IR module
    Emit {
        /// Source file to compile
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the IR here instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },

    /// Run a source file, printing every top-level expression's value
    Run {
        /// Source file to run
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Evaluate code from the command line
    Eval {
        /// Code to evaluate
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// Check a source file for errors without running it
    Check {
        /// Source file to check
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Start an interactive session
    Repl,
}

fn load_config(args: &Args) -> Result<CompileConfig> {
    let mut config = match &args.config {
        Some(path) => CompileConfig::load(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => CompileConfig::default(),
    };
    if args.no_color {
        config.color = false;
    }
    if args.dump_ir {
        config.dump_ir = true;
    }
    Ok(config)
}

fn compiler(config: &CompileConfig) -> Compiler {
    Compiler::new(config.clone()).with_reporter(TextEmitter::with_config(EmitterConfig {
        use_colors: config.color,
        ..EmitterConfig::default()
    }))
}

/// Compile and evaluate, printing values; fails if any unit failed
fn execute(
    name: &str,
    source: &str,
    config: &CompileConfig,
) -> Result<()> {
    let mut compiler = compiler(config).with_interpreter();
    let mut errors = 0;
    for outcome in compiler.session(name, source) {
        match outcome {
            UnitOutcome::Success(unit) if unit.kind == UnitKind::Expression => {
                if let Some(value) = unit.value {
                    println!("{}", value);
                }
            }
            UnitOutcome::Success(_) => {}
            UnitOutcome::Failure(_) => errors += 1,
        }
    }
    if errors > 0 {
        bail!("{} error(s) in {}", errors, name);
    }
    Ok(())
}

/// Compile without evaluating; returns the module text
fn emit(
    file: &Path,
    config: &CompileConfig,
) -> Result<String> {
    let source = read_source(file)?;
    let name = file.display().to_string();
    let mut compiler = compiler(config);
    let errors = compiler
        .compile(&name, &source)
        .iter()
        .filter(|o| !o.is_success())
        .count();
    if errors > 0 {
        bail!("{} error(s) in {}", errors, name);
    }
    Ok(compiler.into_module().to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        logger::init_debug();
    } else {
        logger::init_with_level(LogLevel::Warn);
    }
    let config = load_config(&args)?;

    match &args.command {
        Commands::Emit { file, output } => {
            let ir = emit(file, &config)?;
            match output {
                Some(out) => fs::write(out, ir)
                    .with_context(|| format!("failed to write IR: {}", out.display()))?,
                None => print!("{}", ir),
            }
        }
        Commands::Run { file } => {
            let source = read_source(file)?;
            execute(&file.display().to_string(), &source, &config)?;
        }
        Commands::Eval { code } => {
            execute("<eval>", code, &config)?;
        }
        Commands::Check { file } => {
            emit(file, &config)?;
            eprintln!("{}: no errors", file.display());
        }
        Commands::Repl => {
            LineRepl::new(config).context("failed to start the REPL")?.run()?;
        }
    }

    Ok(())
}
