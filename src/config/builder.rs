//! Job builder from YAML configuration.
//!
//! This module converts flat job records into [`Job`] definitions.

use std::path::Path;

use tracing::debug;

use crate::core::job::Job;
use crate::translate::job_from_flat;

use super::error::ConfigError;
use super::types::FlatJob;
use super::yaml::YamlLoader;

/// Builder for creating Jobs from flat configuration.
pub struct JobConfigBuilder;

impl JobConfigBuilder {
    /// Build a Job from a flat record.
    pub fn build(config: &FlatJob) -> Result<Job, ConfigError> {
        Ok(job_from_flat(config)?)
    }

    /// Parse and build a Job from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Job, ConfigError> {
        let config = YamlLoader::parse_job_config(yaml)?;
        Self::build(&config)
    }
}

/// Load all job configurations from a directory.
///
/// Only `.yaml` and `.yml` files are read. Jobs are returned sorted by file name.
pub fn load_jobs_from_directory(dir: impl AsRef<Path>) -> Result<Vec<Job>, ConfigError> {
    let dir = dir.as_ref();

    if !dir.is_dir() {
        return Err(ConfigError::InvalidConfig(format!(
            "'{}' is not a directory",
            dir.display()
        )));
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if let Some(ext) = path.extension()
            && (ext == "yaml" || ext == "yml")
        {
            paths.push(path);
        }
    }
    paths.sort();

    let mut jobs = Vec::with_capacity(paths.len());
    for path in paths {
        debug!(path = %path.display(), "loading job");
        let config = YamlLoader::load_job_config(&path)?;
        jobs.push(JobConfigBuilder::build(&config)?);
    }

    Ok(jobs)
}
