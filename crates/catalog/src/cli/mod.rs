//! # CLI Behavior
//!
//! This is **one possible UI client** for the catalog, not the catalog itself.
//! It is the only place that knows about terminal I/O and exit codes.
//!
//! Every command prints its result as pretty JSON on stdout. Feature values
//! are printed in their three-slot form (`valueString` / `valueNumber` /
//! `valueBoolean`). Logs go to stderr; set `CATALOG_LOG` (an `EnvFilter`
//! directive) or pass `-v` for debug output.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap
//! - `commands`: context setup and dispatch to the API
//! - `render`: JSON output

mod commands;
mod render;
pub mod setup;

pub use commands::{exit_code, run};
