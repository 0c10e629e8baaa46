//! Fetch a Copernicus DEM for a bounding box and optionally benchmark the
//! compute nodes with a dense linear-algebra workload.
//!
//! Example command lines:
//!
//! ```text
//! # bounding box: left bottom right top
//! get-dem --bbox -156 18.8 -154.7 20.3 --out_dir output
//!
//! # --compute will perform intense, multi-core computations
//! get-dem --bbox -156 18.8 -154.7 20.3 --compute --out_dir output
//! ```

use clap::Parser;
use dembench_runner::GetDemArgs;

fn main() {
    dembench_runner::init_tracing();

    let args = GetDemArgs::parse();
    if let Err(e) = dembench_runner::run_get_dem(&args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
