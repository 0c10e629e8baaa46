//! Collapse a run's detailed profiler output (`profile.json` +
//! `elapsed.json`) into the four-field `simple_profile.json`.

use clap::Parser;
use dembench_runner::SimplifyArgs;

fn main() {
    dembench_runner::init_tracing();

    let args = SimplifyArgs::parse();
    match dembench_runner::run_simplify(&args) {
        Ok(path) => tracing::info!("wrote {}", path.display()),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
