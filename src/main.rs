use std::process::ExitCode;

use disaster_sentiment::app::run_cli;

fn main() -> ExitCode {
    let mut stdout = std::io::stdout().lock();
    match run_cli(std::env::args().skip(1), &mut stdout) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}
