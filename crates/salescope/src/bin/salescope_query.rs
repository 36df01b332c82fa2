//! salescope-query binary - run a cataloged query against a transaction CSV.

use std::process::ExitCode;

fn main() -> ExitCode {
    salescope::cmd::query::main()
}
