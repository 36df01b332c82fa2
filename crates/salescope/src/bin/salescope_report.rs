//! salescope-report binary - run the full query catalog over a transaction CSV.

use std::process::ExitCode;

fn main() -> ExitCode {
    salescope::cmd::report_cmd::main()
}
