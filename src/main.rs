// SerCat - Minimal serial port terminal bridge
use clap::error::ErrorKind;
use clap::Parser;
use sercat::cli::output::write_usage;
use sercat::cli::{execute_command, Args};
use sercat::infrastructure::logging::init_logging;
use sercat::Diagnostics;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&Diagnostics::new(args.verbosity())) {
        eprintln!("Warning: {}", e);
    }

    if let Err(e) = execute_command(args).await {
        eprintln!("Error: {}", e);
        if e.is_usage() {
            write_usage();
        }
        std::process::exit(e.exit_code());
    }
}
