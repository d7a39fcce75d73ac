//! # Calcula CLI Application
//!
//! Terminal front end for the calculator engine.
//!
//! ```text
//! calc_cli eval "2**10" "sin(π÷2)"
//! calc_cli --lang de eval "1÷0" --json
//! calc_cli repl
//! ```

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use calc_core::{evaluate, Calculator, History, Language, Strings};

/// Command-line arguments for calc_cli.
#[derive(Debug, Parser)]
#[command(name = "calc_cli")]
#[command(about = "Calcula expression calculator")]
#[command(version)]
struct CliArgs {
    /// Language for error messages (en, tr, de)
    #[arg(long, env = "CALCULA_LANG", default_value = "en")]
    lang: Language,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate each expression and print its result
    Eval {
        #[arg(required = true)]
        expressions: Vec<String>,

        /// Print one JSON object per expression
        #[arg(long)]
        json: bool,
    },
    /// Read expressions from stdin, one per line
    Repl,
}

fn main() -> ExitCode {
    init_tracing();

    let args = CliArgs::parse();
    let strings = args.lang.strings();

    let outcome = match args.command {
        Command::Eval { expressions, json } => Ok(run_eval(&expressions, json, strings)),
        Command::Repl => run_repl(strings),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("calc_cli: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Returns false if any expression failed
fn run_eval(expressions: &[String], json: bool, strings: &Strings) -> bool {
    let mut all_ok = true;
    for expression in expressions {
        let result = evaluate(expression);
        all_ok &= result.is_ok();

        if json {
            let value = match &result {
                Ok(evaluation) => json!({ "ok": true, "evaluation": evaluation }),
                Err(e) => json!({
                    "ok": false,
                    "expression": expression,
                    "code": e.error_code(),
                    "error": e,
                }),
            };
            println!("{}", value);
        } else {
            match result {
                Ok(evaluation) => println!("{}", evaluation.display),
                Err(e) => {
                    tracing::debug!(error = %e, "evaluation failed");
                    println!("{}", strings.error_math);
                }
            }
        }
    }
    all_ok
}

fn run_repl(strings: &Strings) -> io::Result<bool> {
    let mut calc = Calculator::new();
    let mut history = History::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print_prompt(&mut stdout)?;
    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "" => {}
            ":quit" | ":q" => break,
            ":clear" => {
                history.clear();
                calc.clear();
            }
            ":history" => {
                if history.is_empty() {
                    writeln!(stdout, "{}", strings.history_empty)?;
                }
                for entry in history.iter() {
                    writeln!(stdout, "{} = {}", entry.expression, entry.result)?;
                }
            }
            expression => {
                calc.clear();
                calc.input(expression);
                calc.calculate(&mut history, strings);
                writeln!(stdout, "{}", calc.display())?;
            }
        }
        print_prompt(&mut stdout)?;
    }
    Ok(true)
}

fn print_prompt(stdout: &mut io::Stdout) -> io::Result<()> {
    write!(stdout, "> ")?;
    stdout.flush()
}
