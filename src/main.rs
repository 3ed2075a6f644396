use std::{path::PathBuf, process};

use clap::Parser;
use log::{debug, LevelFilter};
use sjavac::{config::Config, display_error, errors::errors::ErrorKind, verify_file};

#[derive(Parser)]
#[command(name = "sjavac")]
#[command(about = "Verifies that an s-Java source file is legal")]
#[command(version)]
struct Cli {
    /// Input .sjava file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Log each pass and method while verifying
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            eprintln!("{}", error);
            println!("{}", ErrorKind::Io.exit_code());
            process::exit(ErrorKind::Io.exit_code());
        }
    };

    env_logger::builder()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    let config = Config::from_env();
    debug!("{:?}", config);

    let code = match verify_file(&cli.file, &config) {
        Ok(()) => 0,
        Err(error) => {
            display_error(&error, &cli.file);
            error.kind().exit_code()
        }
    };

    println!("{}", code);
    process::exit(code);
}
