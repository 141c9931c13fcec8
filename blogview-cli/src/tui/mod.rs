//! Terminal viewer for indexed posts
//!
//! - Post key list on the left, body of the selected post on the right
//! - Substring filter over keys (`/`)
//! - Re-index without leaving the viewer (`r`)

pub mod app;
pub mod event;
pub mod terminal;
pub mod ui;

pub use terminal::run;
