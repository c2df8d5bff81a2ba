//! Hack Assembler CLI
//!
//! ```bash
//! hack-asm Max.asm            # writes Max.hack
//! hack-asm Pong.asm -o out.hack --symbols
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser as ClapParser;
use log::info;

use hack_asm::{Program, assemble_file, output_path};

#[derive(ClapParser, Debug)]
#[command(name = "hack-asm")]
#[command(author = "nand2tetris")]
#[command(version)]
#[command(about = "Two-pass assembler for the Hack computer")]
struct Args {
    /// Input assembly file (.asm)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (defaults to INPUT with a .hack extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show detailed output
    #[arg(short, long)]
    verbose: bool,

    /// Print the program's labels and variables
    #[arg(long)]
    symbols: bool,
}

impl Args {
    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| output_path(&self.input))
    }
}

/// One `address  name` line per label or variable, by address.
fn symbol_listing(program: &Program) -> String {
    program
        .user_symbols()
        .into_iter()
        .map(|(name, address)| format!("{:>5}  {}\n", address, name))
        .collect()
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let output = args.output_path();
    let start = Instant::now();

    info!("assembling {}", args.input.display());
    let program = match assemble_file(&args.input, &output) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };

    if args.symbols {
        print!("{}", symbol_listing(&program));
    }

    if args.verbose {
        eprintln!(
            "  {} instructions assembled in {:.2}ms",
            program.words.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        eprintln!("  Output: {}", output.display());
    } else {
        println!("{} -> {}", args.input.display(), output.display());
    }

    ExitCode::SUCCESS
}
