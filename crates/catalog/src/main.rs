//! # Catalog CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and turns failures into an exit status.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/catalog/src/cli/)                        │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - JSON rendering to stdout (render.rs)                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/catalogapp/src/api.rs)                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI owns argument
//! parsing, logging setup, rendering and exit codes.
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Any other failure |
//! | 2 | Validation or type mismatch |
//! | 3 | Reference to a missing entity |
//! | 4 | Not found |
//! | 5 | Storage failure |

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(cli::exit_code(&e));
    }
}
