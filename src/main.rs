//! Client entrypoint for the CSR build.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

fn main() {
	force_network::init_logging();
	force_network::run();
}
