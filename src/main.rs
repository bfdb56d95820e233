use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::debug;
use thiserror::Error;
use vm::{Machine, RuntimeError, StdoutHost};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
    /// Log more. `-v` shows stage boundaries, `-vv` traces the VM. `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a source file
    Build {
        /// Path to the input source file, or `-` for stdin
        input: String,
        /// Output file. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// What to write
        #[arg(long, value_enum, default_value_t = Emit::Wat)]
        emit: Emit,
    },
    /// Compile and execute on the reference VM
    Run {
        /// Path to the input source file, or `-` for stdin
        input: String,
    },
    /// Parse and type-check only
    Check {
        /// Path to the input source file, or `-` for stdin
        input: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Emit {
    /// WebAssembly text
    Wat,
    /// WebAssembly binary
    Wasm,
    /// The parsed program
    Ast,
    /// The analyzed program with inferred types
    Typed,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{path}: {source}")]
    Io { path: String, source: io::Error },

    #[error(transparent)]
    Compile(#[from] tinypy::Error),

    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

fn read_source(input: &str) -> Result<String, CliError> {
    let io_err = |source| CliError::Io {
        path: input.to_string(),
        source,
    };
    if input == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source).map_err(io_err)?;
        Ok(source)
    } else {
        fs::read_to_string(input).map_err(io_err)
    }
}

fn write_output(output: Option<&PathBuf>, bytes: &[u8]) -> Result<(), CliError> {
    match output {
        Some(path) => fs::write(path, bytes).map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        }),
        None => io::stdout().write_all(bytes).map_err(|source| CliError::Io {
            path: "<stdout>".to_string(),
            source,
        }),
    }
}

fn build(input: &str, output: Option<&PathBuf>, emit: Emit) -> Result<(), CliError> {
    let source = read_source(input)?;
    let bytes = match emit {
        Emit::Ast => parser::parse_program(&source)
            .map_err(tinypy::Error::from)?
            .to_string()
            .into_bytes(),
        Emit::Typed => {
            let (_, analysis) = tinypy::check(&source)?;
            ast::display::Printer::new(true)
                .print(&analysis.program)
                .into_bytes()
        }
        Emit::Wat => tinypy::compile(&source)?.wat().into_bytes(),
        Emit::Wasm => tinypy::compile(&source)?.to_binary()?,
    };
    debug!("writing {} bytes of {:?}", bytes.len(), emit);
    write_output(output, &bytes)
}

fn run(input: &str) -> Result<(), CliError> {
    let compilation = tinypy::compile(&read_source(input)?)?;
    let mut machine = Machine::new(&compilation.module, StdoutHost::new())?;
    let result = machine.invoke(wasm::ENTRY_EXPORT)?;
    println!("result: {}", result);
    Ok(())
}

fn check(input: &str) -> Result<(), CliError> {
    tinypy::check(&read_source(input)?)?;
    println!("ok");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match &args.command {
        Command::Build {
            input,
            output,
            emit,
        } => build(input, output.as_ref(), *emit),
        Command::Run { input } => run(input),
        Command::Check { input } => check(input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
