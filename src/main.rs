use std::process::ExitCode;

fn main() -> ExitCode {
    match eldercare_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("eldercare: {e}");
            ExitCode::FAILURE
        }
    }
}
