//! Job assembly from, and disassembly into, a [`FlatJob`].

use tracing::{debug, info_span};

use crate::config::types::{FlatJob, FlatLogFilter};
use crate::core::job::{CommandSequence, Dispatch, Job, LogFilter, NodeFilter, OrderingStrategy};
use crate::core::schedule::Schedule;
use crate::core::types::JobId;

use super::command::{command_to_flat, commands_from_flat};
use super::error::TranslateError;
use super::notification::{notifications_from_flat, notifications_to_flat};
use super::options::{options_from_flat, options_to_flat};

/// Assemble a job from its flat record.
///
/// Dispatch and node filter are always populated. The schedule is decoded only
/// when the schedule string is non-empty. The first error from any translator
/// aborts the assembly.
pub fn job_from_flat(flat: &FlatJob) -> Result<Job, TranslateError> {
    let _span = info_span!("job_from_flat", job = %flat.name, project = %flat.project_name).entered();

    let dispatch = Dispatch {
        max_thread_count: flat.max_thread_count,
        continue_next_node_on_error: flat.continue_next_node_on_error,
        rank_attribute: flat.rank_attribute.clone(),
        rank_order: flat.rank_order.clone(),
        success_on_empty_node_filter: flat.success_on_empty_node_filter,
    };

    let node_filter = NodeFilter {
        query: flat.node_filter_query.clone(),
        exclude_query: flat.node_filter_exclude_query.clone(),
        exclude_precedence: flat.node_filter_exclude_precedence,
    };

    let sequence = CommandSequence {
        continue_on_error: flat.continue_on_error,
        ordering_strategy: OrderingStrategy::from(flat.command_ordering_strategy.as_str()),
        commands: commands_from_flat(&flat.command)?,
        global_log_filters: log_filters_from_flat(&flat.global_log_filter),
    };

    let options = options_from_flat(&flat.option, flat.preserve_options_order)?;

    let schedule = if flat.schedule.is_empty() {
        None
    } else {
        Some(Schedule::decode(&flat.schedule)?)
    };

    let notification = notifications_from_flat(&flat.notification)?;

    debug!(
        commands = sequence.commands.len(),
        options = options.as_ref().map_or(0, |o| o.len()),
        scheduled = schedule.is_some(),
        "assembled job"
    );

    Ok(Job {
        id: flat.id.as_deref().map(JobId::new),
        name: flat.name.clone(),
        group_name: flat.group_name.clone(),
        project_name: flat.project_name.clone(),
        description: flat.description.clone(),
        execution_enabled: flat.execution_enabled,
        timeout: flat.timeout.clone(),
        schedule_enabled: flat.schedule_enabled,
        time_zone: flat.time_zone.clone(),
        log_level: flat.log_level.clone(),
        allow_concurrent_executions: flat.allow_concurrent_executions,
        retry: flat.retry.clone(),
        dispatch: Some(dispatch),
        node_filter: Some(node_filter),
        schedule,
        sequence,
        options,
        notification,
    })
}

/// Disassemble a job into a fresh flat record. Never fails.
pub fn job_to_flat(job: &Job) -> FlatJob {
    let mut flat = FlatJob::default();
    write_job_to_flat(job, &mut flat);
    flat
}

/// Disassemble a job into an existing flat record, as a read refresh does.
///
/// The project name is only overwritten when the job carries one, and missing
/// dispatch settings are replaced by the fixed defaults.
pub fn write_job_to_flat(job: &Job, flat: &mut FlatJob) {
    flat.id = job.id.as_ref().map(|id| id.as_str().to_string());
    flat.name = job.name.clone();
    flat.group_name = job.group_name.clone();
    retain_project_name(&job.project_name, flat);
    flat.description = job.description.clone();
    flat.execution_enabled = job.execution_enabled;
    flat.timeout = job.timeout.clone();
    flat.schedule_enabled = job.schedule_enabled;
    flat.time_zone = job.time_zone.clone();
    flat.log_level = job.log_level.clone();
    flat.allow_concurrent_executions = job.allow_concurrent_executions;
    flat.retry = job.retry.clone();

    let dispatch = normalize_dispatch(job.dispatch.as_ref());
    flat.max_thread_count = dispatch.max_thread_count;
    flat.continue_next_node_on_error = dispatch.continue_next_node_on_error;
    flat.rank_attribute = dispatch.rank_attribute;
    flat.rank_order = dispatch.rank_order;
    flat.success_on_empty_node_filter = dispatch.success_on_empty_node_filter;

    let node_filter = job.node_filter.clone().unwrap_or_default();
    flat.node_filter_query = node_filter.query;
    flat.node_filter_exclude_query = node_filter.exclude_query;
    flat.node_filter_exclude_precedence = node_filter.exclude_precedence;

    flat.option = Vec::new();
    if let Some(options) = &job.options {
        flat.preserve_options_order = options.preserve_order;
        flat.option = options_to_flat(options);
    }

    flat.command_ordering_strategy = job.sequence.ordering_strategy.to_string();
    flat.continue_on_error = job.sequence.continue_on_error;
    flat.global_log_filter = job
        .sequence
        .global_log_filters
        .as_deref()
        .map(log_filters_to_flat)
        .unwrap_or_default();
    flat.command = job.sequence.commands.iter().map(command_to_flat).collect();

    flat.schedule = job.schedule.as_ref().map(Schedule::encode).unwrap_or_default();

    flat.notification = job
        .notification
        .as_ref()
        .map(notifications_to_flat)
        .unwrap_or_default();
}

/// Dispatch settings to write back for a retrieved job.
///
/// Jobs read from older or inconsistent servers may carry no dispatch block;
/// they are normalized to a single thread, no continuation, no rank attribute
/// and ascending rank order.
pub fn normalize_dispatch(dispatch: Option<&Dispatch>) -> Dispatch {
    match dispatch {
        Some(dispatch) => dispatch.clone(),
        None => {
            debug!("job has no dispatch settings, using defaults");
            Dispatch::default()
        }
    }
}

/// Write the project name back only when the server returned one.
///
/// Not every server version returns it, and a job never changes project.
pub fn retain_project_name(project_name: &str, flat: &mut FlatJob) {
    if !project_name.is_empty() {
        flat.project_name = project_name.to_string();
    }
}

fn log_filters_from_flat(records: &[FlatLogFilter]) -> Option<Vec<LogFilter>> {
    if records.is_empty() {
        return None;
    }
    Some(
        records
            .iter()
            .map(|record| LogFilter {
                filter_type: record.filter_type.clone(),
                config: record.config.clone(),
            })
            .collect(),
    )
}

fn log_filters_to_flat(filters: &[LogFilter]) -> Vec<FlatLogFilter> {
    filters
        .iter()
        .map(|filter| FlatLogFilter {
            filter_type: filter.filter_type.clone(),
            config: filter.config.clone(),
        })
        .collect()
}
