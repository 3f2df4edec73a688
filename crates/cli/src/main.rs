use std::process::ExitCode;

fn main() -> ExitCode {
    botanica_cli::run()
}
