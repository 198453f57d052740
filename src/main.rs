//! nap_packager - build environment checker and project packager for NAP.
//!
//! This binary checks Linux build hosts and packages NAP projects into
//! timestamped, platform-specific archives.

use std::process;

#[tokio::main]
async fn main() {
    // Run CLI and get exit code
    let exit_code = match nap_packager::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
