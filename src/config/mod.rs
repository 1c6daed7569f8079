//! JSON configuration for the command-line tools.

pub mod session;

pub use session::{load_config, parse_config, LandmarkConfig, OutputConfig, SessionConfig};
