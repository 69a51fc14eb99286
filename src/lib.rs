// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod logging;
pub mod progression;
pub mod result;
pub mod runtime;
pub mod session;
pub mod timer;
pub mod ui;
pub mod window;
pub mod word_source;
