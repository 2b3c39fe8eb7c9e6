//! Flat YAML to job definition and back.

use rdjob::testing::sample_job;
use rdjob::translate::{
    ErrorKind, TranslateError, job_from_flat, job_to_flat, notifications_from_flat,
};
use rdjob::config::FlatNotification;
use rdjob::{
    ConfigError, FlatJob, Job, JobConfigBuilder, NotificationTrigger, OrderingStrategy, Schedule,
    YamlLoader,
};

use crate::common::FULL_JOB_YAML;

fn assemble(yaml: &str) -> Result<Job, ConfigError> {
    JobConfigBuilder::from_yaml(yaml)
}

fn translate_error(result: Result<Job, ConfigError>) -> TranslateError {
    match result {
        Err(ConfigError::Translate(err)) => err,
        other => panic!("Expected translation error, got {:?}", other),
    }
}

#[test]
fn test_full_yaml_assembles() {
    let job = assemble(FULL_JOB_YAML).unwrap();

    assert_eq!(job.full_name(), "web/deploy");
    assert_eq!(job.time_zone, "UTC");
    assert_eq!(job.timeout, "1h");

    let dispatch = job.dispatch.as_ref().unwrap();
    assert_eq!(dispatch.max_thread_count, 2);
    assert!(dispatch.success_on_empty_node_filter);

    let node_filter = job.node_filter.as_ref().unwrap();
    assert_eq!(node_filter.query, "tags:web");
    assert!(node_filter.exclude_precedence);

    let schedule = job.schedule.as_ref().unwrap();
    assert_eq!(schedule.month.day, "?");
    assert_eq!(schedule.week_day.day, "MON-FRI");

    assert_eq!(job.sequence.ordering_strategy, OrderingStrategy::Parallel);
    assert_eq!(job.sequence.commands.len(), 3);

    let build = &job.sequence.commands[0];
    assert_eq!(build.script, "make release");
    assert_eq!(
        build.script_interpreter.as_ref().map(|i| i.invocation_string.as_str()),
        Some("bash -e")
    );
    let handler = build.error_handler.as_deref().unwrap();
    assert_eq!(handler.shell_command, "make clean");
    assert!(handler.keep_going_on_success);
    assert!(handler.error_handler.is_none());

    let reference = job.sequence.commands[1].job.as_ref().unwrap();
    assert_eq!(reference.arguments, "-env prod");
    assert_eq!(
        reference.node_filter.as_ref().map(|f| f.query.as_str()),
        Some("tags:canary")
    );

    let options = job.options.as_ref().unwrap();
    assert!(options.preserve_order);
    assert_eq!(options.get("version").unwrap().value_choices, vec!["1.0", "1.1"]);

    let notifications = job.notification.as_ref().unwrap();
    let slack = notifications
        .get(NotificationTrigger::OnStart)
        .and_then(|n| n.plugin.as_ref())
        .unwrap();
    assert_eq!(slack.config.get("channel").map(String::as_str), Some("#ops"));
    assert!(
        notifications
            .get(NotificationTrigger::OnSuccess)
            .and_then(|n| n.webhook.as_ref())
            .is_some()
    );
}

#[test]
fn test_full_yaml_round_trips_through_domain() {
    let job = assemble(FULL_JOB_YAML).unwrap();
    let back = job_from_flat(&job_to_flat(&job)).unwrap();
    assert_eq!(back, job);
}

#[test]
fn test_notifications_are_written_in_trigger_order() {
    let flat = job_to_flat(&assemble(FULL_JOB_YAML).unwrap());
    let triggers: Vec<&str> = flat.notification.iter().map(|n| n.trigger.as_str()).collect();
    assert_eq!(triggers, vec!["on_success", "on_failure", "on_start"]);
}

#[test]
fn test_written_yaml_reloads_to_same_job() {
    let job = sample_job();
    let yaml = YamlLoader::to_yaml(&job_to_flat(&job)).unwrap();
    assert_eq!(assemble(&yaml).unwrap(), job);
}

#[test]
fn test_domain_json_round_trip() {
    let job = sample_job();
    let json = serde_json::to_string(&job).unwrap();
    let parsed: Job = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, job);
}

#[test]
fn test_unknown_ordering_strategy_passes_through() {
    let yaml = r#"
name: job
project_name: ops
command_ordering_strategy: sequential
command:
  - shell_command: echo
"#;
    let job = assemble(yaml).unwrap();
    assert_eq!(
        job.sequence.ordering_strategy,
        OrderingStrategy::Other("sequential".into())
    );
    assert_eq!(job_to_flat(&job).command_ordering_strategy, "sequential");
}

#[test]
fn test_schedule_exclusivity() {
    assert!(Schedule::decode("0 0 12 ? 1 MON *").is_ok());
    assert!(Schedule::decode("0 0 12 * 1 * *").is_ok());

    let yaml = r#"
name: job
project_name: ops
schedule: "0 0 12 15 1 MON *"
command:
  - shell_command: echo
"#;
    let err = translate_error(assemble(yaml));
    assert_eq!(err.kind(), ErrorKind::FieldInvariantViolation);
}

#[test]
fn test_schedule_text_is_canonicalized() {
    let yaml = r#"
name: job
project_name: ops
schedule: "0  15   10 ? * MON-FRI *"
command:
  - shell_command: echo
"#;
    let flat = job_to_flat(&assemble(yaml).unwrap());
    assert_eq!(flat.schedule, "0 15 10 ? * MON-FRI *");
}

#[test]
fn test_option_storage_path_requires_obscure_input() {
    let yaml = |obscure: bool| {
        format!(
            r#"
name: job
project_name: ops
option:
  - name: secret
    storage_path: /keys/x
    obscure_input: {}
command:
  - shell_command: echo
"#,
            obscure
        )
    };

    let err = translate_error(assemble(&yaml(false)));
    assert_eq!(err.kind(), ErrorKind::FieldInvariantViolation);
    assert!(matches!(err, TranslateError::InvalidOption { index: 0, .. }));

    assert!(assemble(&yaml(true)).is_ok());
}

#[test]
fn test_two_script_interpreters_rejected() {
    let yaml = r#"
name: job
project_name: ops
command:
  - inline_script: echo
    script_interpreter:
      - invocation_string: bash
      - invocation_string: sh
"#;
    let err = translate_error(assemble(yaml));
    assert_eq!(err.kind(), ErrorKind::StructuralViolation);
    assert!(err.to_string().contains("script_interpreter"));
}

#[test]
fn test_two_error_handlers_rejected() {
    let yaml = r#"
name: job
project_name: ops
command:
  - shell_command: ./run.sh
    error_handler:
      - shell_command: ./a.sh
      - shell_command: ./b.sh
"#;
    let err = translate_error(assemble(yaml));
    assert!(matches!(
        err,
        TranslateError::TooManyBlocks {
            block: "error_handler",
            count: 2
        }
    ));
}

#[test]
fn test_notification_uniqueness() {
    let yaml = r#"
name: job
project_name: ops
notification:
  - type: on_success
  - type: on_failure
  - type: on_start
command:
  - shell_command: echo
"#;
    let job = assemble(yaml).unwrap();
    let notifications = job.notification.unwrap();
    assert_eq!(notifications.iter().count(), 3);

    let duplicate = r#"
name: job
project_name: ops
notification:
  - type: on_success
  - type: on_success
command:
  - shell_command: echo
"#;
    let err = translate_error(assemble(duplicate));
    assert_eq!(err.kind(), ErrorKind::DuplicateKey);
}

#[test]
fn test_unknown_notification_type() {
    let yaml = r#"
name: job
project_name: ops
notification:
  - type: on_retry
command:
  - shell_command: echo
"#;
    let err = translate_error(assemble(yaml));
    assert_eq!(err.kind(), ErrorKind::UnknownEnumValue);
}

#[test]
fn test_first_failure_wins() {
    // Commands are translated before options and the schedule.
    let mut flat: FlatJob = YamlLoader::parse_job_config(FULL_JOB_YAML).unwrap();
    flat.command[0].script_interpreter.push(Default::default());
    flat.option[0].is_date = true;
    flat.schedule = "not a schedule".into();

    let err = job_from_flat(&flat).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StructuralViolation);
}

#[test]
fn test_duplicate_option_names_rejected() {
    let yaml = r#"
name: job
project_name: ops
option:
  - name: env
  - name: env
    required: true
command:
  - shell_command: echo
"#;
    let err = translate_error(assemble(yaml));
    assert_eq!(err.kind(), ErrorKind::DuplicateKey);
}

#[test]
fn test_too_many_notification_blocks() {
    let records = vec![FlatNotification::default(); 4];
    assert!(matches!(
        notifications_from_flat(&records),
        Err(TranslateError::TooManyNotificationBlocks(4))
    ));
}
