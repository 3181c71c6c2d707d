//! Event loop and window ownership. [`Runtime::run`] is the engine's entry point.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
