//! Configuration module for tally
//!
//! - XDG-compliant path resolution with an environment override
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::TallyPaths;
pub use settings::Settings;
