//! Terminal front end: wiring between stdin, the controller, and the transport.
mod app;
mod config;
mod effects;
mod input;
mod logging;
mod ui;

pub use app::run_app;
