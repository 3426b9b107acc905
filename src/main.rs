use std::process::ExitCode;

fn main() -> ExitCode {
    lintsnap::cli::run()
}
