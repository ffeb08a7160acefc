//! Autotris (workspace facade crate).
//!
//! Re-exports the workspace crates under stable names
//! (`autotris::{core,engine,input,term,types}`) and holds the application
//! pieces the binary is built from: environment configuration and the
//! file log sink.

pub mod config;
pub mod logging;

pub use autotris_core as core;
pub use autotris_engine as engine;
pub use autotris_input as input;
pub use autotris_term as term;
pub use autotris_types as types;

pub use config::AppConfig;
pub use logging::{log_panic, FileLogger};
