//! Command implementations for the blogview CLI

pub mod convert;
pub mod posts;

pub use convert::run_convert;
pub use posts::{run_check, run_list, run_show};
