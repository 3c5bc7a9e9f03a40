//! Canvas Board command-line shell
//!
//! Each invocation opens the working drawing, applies one command through the
//! board's event channel and writes the drawing back if it changed.

mod app;
mod cli;

pub use app::{App, AppConfig};
pub use cli::{Cli, Command};
