pub mod config;

pub use config::{apply_env_overrides, load_config};
