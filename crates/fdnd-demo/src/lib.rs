#![forbid(unsafe_code)]

//! Library side of the `fdnd-demo` binary.

pub mod cli;
pub mod error;
pub mod logging;
pub mod render;
pub mod script;

pub use cli::{run, run_from_env};
pub use error::{DemoError, Result};
