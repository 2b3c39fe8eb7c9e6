//! Common test utilities shared across integration tests.

use std::path::{Path, PathBuf};

/// A flat job exercising every block the schema offers.
pub const FULL_JOB_YAML: &str = r##"
name: deploy
group_name: web
project_name: prod
description: Deploy the web tier
log_level: DEBUG
retry: "1"
timeout: 1h
max_thread_count: 2
continue_next_node_on_error: true
rank_attribute: hostname
rank_order: descending
success_on_empty_node_filter: true
node_filter_query: "tags:web"
node_filter_exclude_query: "name:web-canary"
node_filter_exclude_precedence: true
command_ordering_strategy: parallel
schedule: "0 30 2 ? * MON-FRI *"
time_zone: UTC
preserve_options_order: true
option:
  - name: version
    required: true
    value_choices: ["1.0", "1.1"]
  - name: token
    obscure_input: true
    exposed_to_scripts: true
    storage_path: keys/deploy/token
global_log_filter:
  - type: mask-passwords
    config:
      replacement: "****"
notification:
  - type: on_start
    plugin:
      - type: slack
        config:
          channel: "#ops"
  - type: on_failure
    email:
      - recipients: [ops@example.com]
        subject: deploy failed
        attach_log: true
  - type: on_success
    webhook_urls: ["https://hooks.example.com/deploy"]
    webhook_http_method: post
    webhook_format: json
command:
  - description: build
    inline_script: make release
    script_interpreter:
      - invocation_string: bash -e
        args_quoted: true
    error_handler:
      - shell_command: make clean
        keep_going_on_success: true
  - job:
      - name: smoke-test
        group_name: qa
        run_for_each_node: true
        args: -env prod
        node_filters:
          - filter: "tags:canary"
  - node_step_plugin:
      - type: systemd-restart
        config:
          unit: web
"##;

/// Minimal flat job YAML with the given name.
pub fn minimal_job_yaml(name: &str) -> String {
    format!(
        "name: {}\nproject_name: ops\ncommand:\n  - shell_command: echo {}\n",
        name, name
    )
}

/// Write a file into `dir` and return its path.
pub fn write_file(dir: &Path, file_name: &str, content: &str) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, content).unwrap();
    path
}
