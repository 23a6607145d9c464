use std::{fs, process::ExitCode};

use abapi::{DEMO_PROGRAM, config::Config, execute_with, init_tracing};
use clap::Parser;

/// abapi runs programs written in a small, statically typed subset of ABAP.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells abapi to read the program from the file named by CONTENTS.
    #[arg(short, long)]
    file: bool,

    /// Runs the built-in demo program instead of CONTENTS.
    #[arg(short, long, conflicts_with_all = ["file", "contents"])]
    demo: bool,

    /// Maximum number of loop passes before the run is stopped.
    #[arg(short, long, default_value_t = Config::default().max_iterations)]
    max_iterations: u64,

    /// The program text, or a path when --file is given.
    #[arg(required_unless_present = "demo")]
    contents: Option<String>,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let source = if args.demo {
        DEMO_PROGRAM.to_string()
    } else {
        let contents = args.contents.unwrap_or_default();
        if args.file {
            match fs::read_to_string(&contents) {
                Ok(source) => source,
                Err(e) => {
                    eprintln!("Failed to read the input file '{contents}': {e}");
                    return ExitCode::FAILURE;
                },
            }
        } else {
            contents
        }
    };

    let config = Config { max_iterations: args.max_iterations };
    let run = execute_with(&source, &config);

    if !run.output.is_empty() {
        println!("{}", run.output);
    }
    for diagnostic in &run.diagnostics {
        eprintln!("{diagnostic}");
    }

    if run.is_clean() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
