//! Flat configuration records.
//!
//! These mirror the provider schema: scalars, lists of scalars, string maps and
//! lists of nested records. Singular sub-blocks (script interpreter, job
//! reference, plugins, error handler) are lists that may hold at most one
//! entry; the translators enforce that bound.
//!
//! The schema cannot recurse, so an error handler has its own record shape,
//! [`FlatErrorHandler`], which is a [`FlatCommand`] without the
//! `error_handler` slot.

use serde::{Deserialize, Serialize};

use crate::core::types::PluginConfig;

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "INFO".to_string()
}

fn default_max_thread_count() -> u32 {
    1
}

fn default_rank_order() -> String {
    "ascending".to_string()
}

fn default_ordering_strategy() -> String {
    "node-first".to_string()
}

/// Root job record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlatJob {
    /// Identity assigned by the remote system after creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub group_name: String,
    pub project_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub execution_enabled: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub allow_concurrent_executions: bool,
    #[serde(default)]
    pub retry: String,
    #[serde(default = "default_max_thread_count")]
    pub max_thread_count: u32,
    #[serde(default)]
    pub continue_on_error: bool,
    #[serde(default)]
    pub continue_next_node_on_error: bool,
    #[serde(default = "default_rank_order")]
    pub rank_order: String,
    #[serde(default)]
    pub rank_attribute: String,
    #[serde(default)]
    pub success_on_empty_node_filter: bool,
    #[serde(default)]
    pub preserve_options_order: bool,
    #[serde(default = "default_ordering_strategy")]
    pub command_ordering_strategy: String,
    #[serde(default)]
    pub node_filter_query: String,
    #[serde(default)]
    pub node_filter_exclude_query: String,
    #[serde(default)]
    pub node_filter_exclude_precedence: bool,
    #[serde(default)]
    pub timeout: String,
    /// 7-field Quartz expression; empty means unscheduled.
    #[serde(default)]
    pub schedule: String,
    #[serde(default = "default_true")]
    pub schedule_enabled: bool,
    #[serde(default)]
    pub time_zone: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notification: Vec<FlatNotification>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub option: Vec<FlatOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub global_log_filter: Vec<FlatLogFilter>,
    pub command: Vec<FlatCommand>,
}

impl Default for FlatJob {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            group_name: String::new(),
            project_name: String::new(),
            description: String::new(),
            execution_enabled: true,
            log_level: default_log_level(),
            allow_concurrent_executions: false,
            retry: String::new(),
            max_thread_count: default_max_thread_count(),
            continue_on_error: false,
            continue_next_node_on_error: false,
            rank_order: default_rank_order(),
            rank_attribute: String::new(),
            success_on_empty_node_filter: false,
            preserve_options_order: false,
            command_ordering_strategy: default_ordering_strategy(),
            node_filter_query: String::new(),
            node_filter_exclude_query: String::new(),
            node_filter_exclude_precedence: false,
            timeout: String::new(),
            schedule: String::new(),
            schedule_enabled: true,
            time_zone: String::new(),
            notification: Vec::new(),
            option: Vec::new(),
            global_log_filter: Vec::new(),
            command: Vec::new(),
        }
    }
}

/// Top-level workflow step record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlatCommand {
    pub description: String,
    pub shell_command: String,
    pub inline_script: String,
    pub script_file: String,
    pub script_file_args: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub script_interpreter: Vec<FlatScriptInterpreter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub job: Vec<FlatJobReference>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub step_plugin: Vec<FlatPlugin>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub node_step_plugin: Vec<FlatPlugin>,
    pub keep_going_on_success: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub error_handler: Vec<FlatErrorHandler>,
}

/// Error handler record: a step with no nested error handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlatErrorHandler {
    pub description: String,
    pub shell_command: String,
    pub inline_script: String,
    pub script_file: String,
    pub script_file_args: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub script_interpreter: Vec<FlatScriptInterpreter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub job: Vec<FlatJobReference>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub step_plugin: Vec<FlatPlugin>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub node_step_plugin: Vec<FlatPlugin>,
    pub keep_going_on_success: bool,
}

/// Borrowed view over the fields shared by [`FlatCommand`] and [`FlatErrorHandler`].
#[derive(Debug, Clone, Copy)]
pub struct StepFields<'a> {
    pub description: &'a str,
    pub shell_command: &'a str,
    pub inline_script: &'a str,
    pub script_file: &'a str,
    pub script_file_args: &'a str,
    pub script_interpreter: &'a [FlatScriptInterpreter],
    pub job: &'a [FlatJobReference],
    pub step_plugin: &'a [FlatPlugin],
    pub node_step_plugin: &'a [FlatPlugin],
    pub keep_going_on_success: bool,
}

impl FlatCommand {
    /// Fields shared with the error handler shape.
    pub fn step_fields(&self) -> StepFields<'_> {
        StepFields {
            description: &self.description,
            shell_command: &self.shell_command,
            inline_script: &self.inline_script,
            script_file: &self.script_file,
            script_file_args: &self.script_file_args,
            script_interpreter: &self.script_interpreter,
            job: &self.job,
            step_plugin: &self.step_plugin,
            node_step_plugin: &self.node_step_plugin,
            keep_going_on_success: self.keep_going_on_success,
        }
    }

    /// Build a top-level step from an error handler shaped record.
    pub fn from_step(step: FlatErrorHandler, error_handler: Option<FlatErrorHandler>) -> Self {
        Self {
            description: step.description,
            shell_command: step.shell_command,
            inline_script: step.inline_script,
            script_file: step.script_file,
            script_file_args: step.script_file_args,
            script_interpreter: step.script_interpreter,
            job: step.job,
            step_plugin: step.step_plugin,
            node_step_plugin: step.node_step_plugin,
            keep_going_on_success: step.keep_going_on_success,
            error_handler: error_handler.into_iter().collect(),
        }
    }
}

impl FlatErrorHandler {
    /// Fields shared with the top-level step shape.
    pub fn step_fields(&self) -> StepFields<'_> {
        StepFields {
            description: &self.description,
            shell_command: &self.shell_command,
            inline_script: &self.inline_script,
            script_file: &self.script_file,
            script_file_args: &self.script_file_args,
            script_interpreter: &self.script_interpreter,
            job: &self.job,
            step_plugin: &self.step_plugin,
            node_step_plugin: &self.node_step_plugin,
            keep_going_on_success: self.keep_going_on_success,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlatScriptInterpreter {
    pub invocation_string: String,
    pub args_quoted: bool,
}

/// Job reference step record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlatJobReference {
    pub name: String,
    pub group_name: String,
    pub run_for_each_node: bool,
    pub args: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub node_filters: Vec<FlatNodeFilter>,
}

/// Node filter nested in a job reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlatNodeFilter {
    pub exclude_precedence: bool,
    pub filter: String,
    pub exclude_filter: String,
}

/// Plugin record used for step, node step and notification plugins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlatPlugin {
    #[serde(rename = "type")]
    pub plugin_type: String,
    #[serde(skip_serializing_if = "PluginConfig::is_empty")]
    pub config: PluginConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlatLogFilter {
    #[serde(rename = "type")]
    pub filter_type: String,
    #[serde(skip_serializing_if = "PluginConfig::is_empty")]
    pub config: PluginConfig,
}

/// Option record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlatOption {
    pub name: String,
    pub label: String,
    pub default_value: String,
    /// A `None` entry is an element the user left null.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub value_choices: Vec<Option<String>>,
    pub value_choices_url: String,
    pub require_predefined_choice: bool,
    pub validation_regex: String,
    pub description: String,
    pub required: bool,
    pub allow_multiple_values: bool,
    pub multi_value_delimiter: String,
    pub obscure_input: bool,
    pub exposed_to_scripts: bool,
    pub storage_path: String,
    pub is_date: bool,
    pub date_format: String,
}

/// Notification record; `type` is one of `on_success`, `on_failure`, `on_start`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlatNotification {
    #[serde(rename = "type")]
    pub trigger: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub email: Vec<FlatEmail>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub webhook_urls: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub webhook_http_method: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub webhook_format: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plugin: Vec<FlatPlugin>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlatEmail {
    pub attach_log: bool,
    pub recipients: Vec<String>,
    pub subject: String,
}
