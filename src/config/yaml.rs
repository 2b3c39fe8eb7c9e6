//! YAML configuration parsing.
//!
//! Parses flat job records from YAML files and checks the schema's required
//! attributes. Domain invariants are left to the translators.

use std::path::Path;

use super::error::ConfigError;
use super::types::{FlatCommand, FlatErrorHandler, FlatJob, FlatPlugin, StepFields};

/// YAML configuration loader.
pub struct YamlLoader;

impl YamlLoader {
    /// Load a flat job record from a file.
    pub fn load_job_config(path: impl AsRef<Path>) -> Result<FlatJob, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: FlatJob =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::YamlFileError {
                path: path.to_path_buf(),
                source,
            })?;
        Self::validate_job_config(&config)?;
        Ok(config)
    }

    /// Parse a flat job record from a YAML string.
    pub fn parse_job_config(yaml: &str) -> Result<FlatJob, ConfigError> {
        let config: FlatJob = serde_yaml::from_str(yaml)?;
        Self::validate_job_config(&config)?;
        Ok(config)
    }

    /// Serialize a flat job record back to YAML.
    pub fn to_yaml(config: &FlatJob) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(config)?)
    }

    /// Check attributes the schema marks as required.
    fn validate_job_config(config: &FlatJob) -> Result<(), ConfigError> {
        if config.name.is_empty() {
            return Err(ConfigError::MissingField("name".into()));
        }

        if config.project_name.is_empty() {
            return Err(ConfigError::MissingField("project_name".into()));
        }

        if config.command.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "job must have at least one command".into(),
            ));
        }

        for (index, option) in config.option.iter().enumerate() {
            if option.name.is_empty() {
                return Err(ConfigError::MissingField(format!("option[{}].name", index)));
            }
        }

        for (index, filter) in config.global_log_filter.iter().enumerate() {
            if filter.filter_type.is_empty() {
                return Err(ConfigError::MissingField(format!(
                    "global_log_filter[{}].type",
                    index
                )));
            }
        }

        for (index, notification) in config.notification.iter().enumerate() {
            let path = format!("notification[{}]", index);
            if notification.trigger.is_empty() {
                return Err(ConfigError::MissingField(format!("{}.type", path)));
            }
            Self::validate_plugins(&path, "plugin", &notification.plugin)?;
        }

        for (index, command) in config.command.iter().enumerate() {
            Self::validate_command(index, command)?;
        }

        Ok(())
    }

    fn validate_command(index: usize, command: &FlatCommand) -> Result<(), ConfigError> {
        let path = format!("command[{}]", index);
        Self::validate_step(&path, command.step_fields())?;

        for (handler_index, handler) in command.error_handler.iter().enumerate() {
            Self::validate_handler(&format!("{}.error_handler[{}]", path, handler_index), handler)?;
        }

        Ok(())
    }

    fn validate_handler(path: &str, handler: &FlatErrorHandler) -> Result<(), ConfigError> {
        Self::validate_step(path, handler.step_fields())
    }

    fn validate_step(path: &str, step: StepFields<'_>) -> Result<(), ConfigError> {
        for (index, job) in step.job.iter().enumerate() {
            if job.name.is_empty() {
                return Err(ConfigError::MissingField(format!(
                    "{}.job[{}].name",
                    path, index
                )));
            }
        }
        Self::validate_plugins(path, "step_plugin", step.step_plugin)?;
        Self::validate_plugins(path, "node_step_plugin", step.node_step_plugin)?;
        Ok(())
    }

    fn validate_plugins(path: &str, block: &str, plugins: &[FlatPlugin]) -> Result<(), ConfigError> {
        for (index, plugin) in plugins.iter().enumerate() {
            if plugin.plugin_type.is_empty() {
                return Err(ConfigError::MissingField(format!(
                    "{}.{}[{}].type",
                    path, block, index
                )));
            }
        }
        Ok(())
    }
}
