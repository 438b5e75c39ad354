use std::process::ExitCode;

fn main() -> ExitCode {
    freightscope_cli::run()
}
