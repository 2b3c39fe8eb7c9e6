//! Workflow steps.
//!
//! A [`Command`] is one step of a job's command sequence. Its error handler is
//! itself a `Command`, but the flat configuration only ever produces handlers
//! one level deep.

use serde::{Deserialize, Serialize};

use super::job::NodeFilter;
use super::types::PluginConfig;

/// A plugin invocation: a provider type plus its opaque configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plugin {
    /// Plugin provider type.
    #[serde(rename = "type")]
    pub plugin_type: String,
    /// Plugin configuration, passed through untouched.
    pub config: PluginConfig,
}

impl Plugin {
    /// Create a plugin of the given type with an empty configuration.
    pub fn new(plugin_type: impl Into<String>) -> Self {
        Self {
            plugin_type: plugin_type.into(),
            config: PluginConfig::new(),
        }
    }

    /// Add a configuration entry.
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }
}

/// Interpreter used to run an inline script or script file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptInterpreter {
    /// Command line prefix, e.g. `sudo -u deploy bash`.
    pub invocation_string: String,
    /// Whether the script and its arguments are passed as one quoted argument.
    pub args_quoted: bool,
}

/// Reference to another job run as a step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobReference {
    /// Name of the referenced job.
    pub name: String,
    /// Group of the referenced job.
    pub group_name: String,
    /// Run the referenced job once per matched node.
    pub run_for_each_node: bool,
    /// Argument string passed to the referenced job.
    pub arguments: String,
    /// Node filter overriding the referenced job's own.
    pub node_filter: Option<NodeFilter>,
}

/// A single workflow step.
///
/// Shell command, inline script and script file are not mutually exclusive
/// here; whatever is set is forwarded as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Command {
    pub description: String,
    pub shell_command: String,
    pub script: String,
    pub script_file: String,
    pub script_file_args: String,
    pub script_interpreter: Option<ScriptInterpreter>,
    pub job: Option<JobReference>,
    pub step_plugin: Option<Plugin>,
    pub node_step_plugin: Option<Plugin>,
    /// Keep going after this step succeeds even if other nodes failed.
    pub keep_going_on_success: bool,
    pub error_handler: Option<Box<Command>>,
}

impl Command {
    /// Create a step running a shell command.
    pub fn shell(command: impl Into<String>) -> Self {
        Self {
            shell_command: command.into(),
            ..Self::default()
        }
    }

    /// Create a step running an inline script.
    pub fn inline_script(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            ..Self::default()
        }
    }

    /// Create a step invoking another job.
    pub fn job_reference(job: JobReference) -> Self {
        Self {
            job: Some(job),
            ..Self::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the error handler.
    pub fn with_error_handler(mut self, handler: Command) -> Self {
        self.error_handler = Some(Box::new(handler));
        self
    }
}
