use std::{error::Error, process::ExitCode};

use batchmagick::{
    args::{init_logging, Cli},
    convert_with, CancelToken, ConversionResult, Reporter,
};
use clap::Parser;

struct StatusPrinter;

impl Reporter for StatusPrinter {
    fn on_result(&self, result: &ConversionResult) {
        println!("{result}");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    match real_main(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("wm-batch: {e}");
            ExitCode::FAILURE
        }
    }
}

fn real_main(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let builder = if cli.interactive {
        cli.prompt()?
    } else {
        cli.builder()
    };
    let request = builder.build()?;

    // per-file failures are in the report, only structural problems end up here
    let report = convert_with(&request, &StatusPrinter, &CancelToken::new())?;

    if !report.is_empty() {
        println!();
    }
    println!("{}", report.summary());
    Ok(())
}
