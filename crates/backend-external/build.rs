//! Link the candidate library named by the environment.

use std::env;
use std::path::Path;

const LIB_DIR: &str = "CYCLECHECK_CANDIDATE_LIB_DIR";
const LIB_NAME: &str = "CYCLECHECK_CANDIDATE_LIB";
const DEFAULT_LIB_NAME: &str = "candidate";

fn main() {
    println!("cargo:rerun-if-env-changed={LIB_DIR}");
    println!("cargo:rerun-if-env-changed={LIB_NAME}");

    let name = env::var(LIB_NAME).unwrap_or_else(|_| DEFAULT_LIB_NAME.to_string());

    match env::var(LIB_DIR) {
        Ok(dir) => {
            if !Path::new(&dir).is_dir() {
                println!("cargo:warning={LIB_DIR}={dir} is not a directory");
            }
            println!("cargo:rustc-link-search=native={dir}");
            println!("cargo:rustc-link-lib={name}");
            println!("cargo:rustc-env=CYCLECHECK_LINKED_CANDIDATE={dir}/{name}");
        }
        Err(_) => {
            // Declarations still compile; only a final link that calls them fails.
            println!(
                "cargo:warning={LIB_DIR} is unset; candidate symbols will not be linked"
            );
            println!("cargo:rustc-env=CYCLECHECK_LINKED_CANDIDATE=");
        }
    }
}
