use std::process;

use finance_core::{cli, init};

fn main() {
    init();

    if let Err(err) = cli::run_cli() {
        cli::output::error(err);
        process::exit(1);
    }
}
