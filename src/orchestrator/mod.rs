//! Application-level orchestration.
//!
//! The UI thread owns all state and sends `UiCommand`s here; this module runs the toolchain
//! on the tokio runtime and reports results back as `AppEvent`s.

mod controller;

pub(crate) use controller::{run_controller, UiCommand};
