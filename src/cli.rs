//! CLI domain: parse, route, and output only.
//! Comparison logic lives in `compare`; rendering in `report`.

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::{Cli, ReportFormat};
pub use route::{execute, resolve_settings};
