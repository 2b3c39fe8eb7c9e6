//! Step records to and from [`Command`].
//!
//! Top-level steps are [`FlatCommand`] records and their error handlers are
//! [`FlatErrorHandler`] records. Both share [`StepFields`], so decoding is one
//! function applied twice; the handler shape has no `error_handler` slot, which
//! caps the recursion at one level.

use tracing::warn;

use crate::config::types::{
    FlatCommand, FlatErrorHandler, FlatJobReference, FlatNodeFilter, FlatPlugin,
    FlatScriptInterpreter, StepFields,
};
use crate::core::command::{Command, JobReference, Plugin, ScriptInterpreter};
use crate::core::job::NodeFilter;

use super::error::TranslateError;

/// Return the single entry of an at-most-one block.
pub(crate) fn at_most_one<'a, T>(
    block: &'static str,
    entries: &'a [T],
) -> Result<Option<&'a T>, TranslateError> {
    match entries {
        [] => Ok(None),
        [entry] => Ok(Some(entry)),
        _ => Err(TranslateError::TooManyBlocks {
            block,
            count: entries.len(),
        }),
    }
}

/// Decode every top-level step, stopping at the first failure.
pub fn commands_from_flat(records: &[FlatCommand]) -> Result<Vec<Command>, TranslateError> {
    records.iter().map(command_from_flat).collect()
}

/// Decode a top-level step and its error handler.
pub fn command_from_flat(record: &FlatCommand) -> Result<Command, TranslateError> {
    let mut command = step_from_flat(record.step_fields())?;

    if let Some(handler) = at_most_one("error_handler", &record.error_handler)? {
        command.error_handler = Some(Box::new(error_handler_from_flat(handler)?));
    }

    Ok(command)
}

/// Decode an error handler. The result never has an error handler of its own.
pub fn error_handler_from_flat(record: &FlatErrorHandler) -> Result<Command, TranslateError> {
    step_from_flat(record.step_fields())
}

fn step_from_flat(fields: StepFields<'_>) -> Result<Command, TranslateError> {
    let script_interpreter =
        at_most_one("script_interpreter", fields.script_interpreter)?.map(|interpreter| {
            ScriptInterpreter {
                invocation_string: interpreter.invocation_string.clone(),
                args_quoted: interpreter.args_quoted,
            }
        });

    let job = at_most_one("job", fields.job)?
        .map(job_reference_from_flat)
        .transpose()?;

    let step_plugin = at_most_one("step_plugin", fields.step_plugin)?.map(plugin_from_flat);
    let node_step_plugin =
        at_most_one("node_step_plugin", fields.node_step_plugin)?.map(plugin_from_flat);

    Ok(Command {
        description: fields.description.to_string(),
        shell_command: fields.shell_command.to_string(),
        script: fields.inline_script.to_string(),
        script_file: fields.script_file.to_string(),
        script_file_args: fields.script_file_args.to_string(),
        script_interpreter,
        job,
        step_plugin,
        node_step_plugin,
        keep_going_on_success: fields.keep_going_on_success,
        error_handler: None,
    })
}

fn job_reference_from_flat(record: &FlatJobReference) -> Result<JobReference, TranslateError> {
    let node_filter = at_most_one("node_filters", &record.node_filters)?.map(|filter| NodeFilter {
        query: filter.filter.clone(),
        exclude_query: filter.exclude_filter.clone(),
        exclude_precedence: filter.exclude_precedence,
    });

    Ok(JobReference {
        name: record.name.clone(),
        group_name: record.group_name.clone(),
        run_for_each_node: record.run_for_each_node,
        arguments: record.args.clone(),
        node_filter,
    })
}

/// Convert a plugin record.
pub(crate) fn plugin_from_flat(record: &FlatPlugin) -> Plugin {
    Plugin {
        plugin_type: record.plugin_type.clone(),
        config: record.config.clone(),
    }
}

/// Convert a plugin to its record.
pub(crate) fn plugin_to_flat(plugin: &Plugin) -> FlatPlugin {
    FlatPlugin {
        plugin_type: plugin.plugin_type.clone(),
        config: plugin.config.clone(),
    }
}

/// Flatten a top-level step. Absent optional blocks are omitted; present ones
/// become single-entry lists.
pub fn command_to_flat(command: &Command) -> FlatCommand {
    let handler = command.error_handler.as_deref().map(|handler| {
        if handler.error_handler.is_some() {
            warn!(
                handler = %handler.description,
                "dropping nested error handler that the flat configuration cannot express"
            );
        }
        error_handler_to_flat(handler)
    });

    FlatCommand::from_step(error_handler_to_flat(command), handler)
}

/// Flatten a step into the error handler shape, ignoring its own error handler.
pub fn error_handler_to_flat(command: &Command) -> FlatErrorHandler {
    FlatErrorHandler {
        description: command.description.clone(),
        shell_command: command.shell_command.clone(),
        inline_script: command.script.clone(),
        script_file: command.script_file.clone(),
        script_file_args: command.script_file_args.clone(),
        script_interpreter: command
            .script_interpreter
            .iter()
            .map(|interpreter| FlatScriptInterpreter {
                invocation_string: interpreter.invocation_string.clone(),
                args_quoted: interpreter.args_quoted,
            })
            .collect(),
        job: command.job.iter().map(job_reference_to_flat).collect(),
        step_plugin: command.step_plugin.iter().map(plugin_to_flat).collect(),
        node_step_plugin: command.node_step_plugin.iter().map(plugin_to_flat).collect(),
        keep_going_on_success: command.keep_going_on_success,
    }
}

fn job_reference_to_flat(job: &JobReference) -> FlatJobReference {
    FlatJobReference {
        name: job.name.clone(),
        group_name: job.group_name.clone(),
        run_for_each_node: job.run_for_each_node,
        args: job.arguments.clone(),
        node_filters: job
            .node_filter
            .iter()
            .map(|filter| FlatNodeFilter {
                exclude_precedence: filter.exclude_precedence,
                filter: filter.query.clone(),
                exclude_filter: filter.exclude_query.clone(),
            })
            .collect(),
    }
}
