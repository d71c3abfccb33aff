use std::process::ExitCode;

use clap::Parser;
use grun_cli::Cli;

fn main() -> ExitCode {
    if let Err(e) = color_eyre::install() {
        eprintln!("color-eyre: {e}");
    }

    // erreur d'usage : clap affiche l'aide et sort avec 2
    let cli = Cli::parse();
    grun_cli::init_logging(cli.level());

    match grun_cli::run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(report) => {
            eprintln!("Error: {report:?}");
            grun_cli::exit_code(&report)
        }
    }
}
