//! Testing utilities for users of the rdjob library.
//!
//! This module provides fixture jobs that exercise every part of the model:
//!
//! - [`sample_job`]: A fully populated job definition
//! - [`sample_flat_job`]: The same job as a flat record
//!
//! Both fixtures survive a flat round trip unchanged.
//!
//! # Example
//!
//! ```
//! use rdjob::testing::{sample_flat_job, sample_job};
//! use rdjob::translate::job_from_flat;
//!
//! let job = job_from_flat(&sample_flat_job()).unwrap();
//! assert_eq!(job, sample_job());
//! ```

use crate::config::types::FlatJob;
use crate::core::command::{Command, JobReference, Plugin, ScriptInterpreter};
use crate::core::job::{CommandSequence, Dispatch, Job, LogFilter, NodeFilter, OrderingStrategy};
use crate::core::notification::{
    EmailNotification, Notification, NotificationSet, WebHookNotification,
};
use crate::core::option::{JobOption, JobOptions};
use crate::core::schedule::{Schedule, ScheduleMonth, ScheduleTime, ScheduleWeekDay, ScheduleYear};
use crate::core::types::PluginConfig;
use crate::translate::job_to_flat;

/// A job with dispatch, node filter, schedule, every kind of step, options,
/// log filters and notifications. It has no identity.
pub fn sample_job() -> Job {
    Job {
        id: None,
        name: "deploy".into(),
        group_name: "web".into(),
        project_name: "prod".into(),
        description: "Deploy the web tier".into(),
        execution_enabled: true,
        timeout: "30m".into(),
        schedule_enabled: true,
        time_zone: "Europe/London".into(),
        log_level: "INFO".into(),
        allow_concurrent_executions: false,
        retry: "2".into(),
        dispatch: Some(Dispatch {
            max_thread_count: 4,
            continue_next_node_on_error: true,
            rank_attribute: "hostname".into(),
            rank_order: "descending".into(),
            success_on_empty_node_filter: true,
        }),
        node_filter: Some(NodeFilter {
            query: "tags:web".into(),
            exclude_query: "name:web-canary".into(),
            exclude_precedence: true,
        }),
        schedule: Some(weekday_schedule()),
        sequence: CommandSequence {
            continue_on_error: false,
            ordering_strategy: OrderingStrategy::StepFirst,
            commands: sample_commands(),
            global_log_filters: Some(vec![LogFilter {
                filter_type: "mask-passwords".into(),
                config: config(&[("replacement", "****"), ("color", "red")]),
            }]),
        },
        options: Some(sample_options()),
        notification: Some(sample_notifications()),
    }
}

/// [`sample_job`] as a flat record.
pub fn sample_flat_job() -> FlatJob {
    job_to_flat(&sample_job())
}

/// `0 30 2 ? * MON-FRI *`
fn weekday_schedule() -> Schedule {
    Schedule {
        time: ScheduleTime {
            seconds: "0".into(),
            minute: "30".into(),
            hour: "2".into(),
        },
        month: ScheduleMonth {
            day: "?".into(),
            month: "*".into(),
        },
        week_day: ScheduleWeekDay {
            day: "MON-FRI".into(),
        },
        year: ScheduleYear { year: "*".into() },
    }
}

fn sample_commands() -> Vec<Command> {
    let build = Command {
        script_interpreter: Some(ScriptInterpreter {
            invocation_string: "bash -e".into(),
            args_quoted: true,
        }),
        ..Command::inline_script("make release")
    }
    .with_description("build")
    .with_error_handler(Command::shell("make clean").with_description("clean up"));

    let smoke_test = Command::job_reference(JobReference {
        name: "smoke-test".into(),
        group_name: "qa".into(),
        run_for_each_node: true,
        arguments: "-env prod".into(),
        node_filter: Some(NodeFilter {
            query: "tags:canary".into(),
            exclude_query: String::new(),
            exclude_precedence: false,
        }),
    });

    let health_check = Command {
        step_plugin: Some(
            Plugin::new("http-request").with_config("url", "https://example.com/health"),
        ),
        ..Command::default()
    };

    let restart = Command {
        script_file: "/opt/deploy/restart.sh".into(),
        script_file_args: "--graceful".into(),
        node_step_plugin: Some(Plugin::new("systemd-restart").with_config("unit", "web")),
        keep_going_on_success: true,
        ..Command::default()
    };

    vec![build, smoke_test, health_check, restart]
}

fn sample_options() -> JobOptions {
    JobOptions {
        preserve_order: true,
        options: vec![
            JobOption {
                label: "Version".into(),
                default_value: "1.1".into(),
                value_choices: vec!["1.0".into(), "1.1".into()],
                require_predefined_choice: true,
                required: true,
                ..JobOption::new("version")
            },
            JobOption {
                obscure_input: true,
                exposed_to_scripts: true,
                storage_path: "keys/deploy/token".into(),
                ..JobOption::new("token")
            },
            JobOption {
                is_date: true,
                date_format: "MM/DD/YYYY".into(),
                ..JobOption::new("release_date")
            },
            JobOption {
                allow_multiple_values: true,
                multi_value_delimiter: ",".into(),
                validation_regex: "^[a-z]+$".into(),
                value_choices_url: "https://example.com/regions".into(),
                ..JobOption::new("regions")
            },
        ],
    }
}

fn sample_notifications() -> NotificationSet {
    NotificationSet {
        on_success: Some(Notification {
            webhook: Some(WebHookNotification {
                urls: vec!["https://hooks.example.com/deploy".into()],
                http_method: "post".into(),
                format: "json".into(),
            }),
            ..Notification::default()
        }),
        on_failure: Some(Notification {
            email: Some(EmailNotification {
                attach_log: true,
                recipients: vec!["ops@example.com".into(), "web@example.com".into()],
                subject: "deploy failed".into(),
            }),
            plugin: Some(Plugin::new("slack").with_config("channel", "#ops")),
            ..Notification::default()
        }),
        on_start: None,
    }
}

fn config(entries: &[(&str, &str)]) -> PluginConfig {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
