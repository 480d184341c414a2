//! warraq-cli - command-line interface for the warraq document compiler

pub mod app;

pub use app::run;
