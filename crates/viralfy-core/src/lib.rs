pub mod config;
pub mod distribution;
pub mod error;
pub mod io;
pub mod knowledge;
pub mod newsletter;
pub mod paths;
pub mod persona;
pub mod progress;
pub mod project;
pub mod script;
pub mod swipe;
pub mod topics;
pub mod types;

pub use error::{Result, ScriptFailure, ViralfyError};
