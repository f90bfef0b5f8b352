use std::process::ExitCode;

fn main() -> ExitCode {
    dcmsort::app::run()
}
