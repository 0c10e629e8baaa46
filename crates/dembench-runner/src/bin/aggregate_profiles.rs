//! Aggregate simplified profiles into a single, mean profile printed on
//! standard output.

use clap::Parser;
use dembench_runner::AggregateArgs;

fn main() {
    dembench_runner::init_tracing();

    let args = AggregateArgs::parse();
    match dembench_runner::run_aggregate(&args) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
