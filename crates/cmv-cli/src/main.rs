use std::process::ExitCode;

use clap::Parser;
use cmv_verify::format::ascii_only;
use commands::verify::{self, Verdict, VerifyArgs};

mod commands;
mod logging;

#[derive(Parser, Debug)]
#[command(
    name = "verify-gaps",
    version,
    about = "Verify contraction smallness conditions."
)]
struct Cli {
    #[command(flatten)]
    args: VerifyArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logging::init_tracing() {
        eprintln!("{}", ascii_only(&format!("warning: {err}")));
    }
    match verify::run(&cli.args) {
        Ok(Verdict::Pass) => ExitCode::SUCCESS,
        Ok(Verdict::Fail) => ExitCode::from(1),
        Err(err) => {
            eprintln!("{}", ascii_only(&format!("error: {err}")));
            ExitCode::from(2)
        }
    }
}
