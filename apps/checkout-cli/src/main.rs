//! # Checkout CLI Entry Point
//!
//! The actual work is in lib.rs for better testability.

use tracing::error;

fn main() {
    checkout_cli::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match checkout_cli::run(&args) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!(error = %e, "Checkout failed");
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}
