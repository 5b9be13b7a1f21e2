//! Output formatting for build plans.

mod output;
mod tables;

pub use output::{print_info, print_json, print_plain};
pub use tables::print_table;
