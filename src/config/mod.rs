//! Flat job configuration.
//!
//! This module provides the flat record shapes, YAML loading and the builder
//! that turns flat records into jobs.

mod builder;
mod error;
pub mod types;
mod yaml;

pub use builder::{JobConfigBuilder, load_jobs_from_directory};
pub use error::ConfigError;
pub use types::{
    FlatCommand, FlatEmail, FlatErrorHandler, FlatJob, FlatJobReference, FlatLogFilter,
    FlatNodeFilter, FlatNotification, FlatOption, FlatPlugin, FlatScriptInterpreter, StepFields,
};
pub use yaml::YamlLoader;
