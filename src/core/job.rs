//! Job definition as exchanged with the remote scheduler.
//!
//! A Job combines identity, dispatch policy, node selection, an optional
//! schedule, the command sequence, options and notifications.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::command::Command;
use super::notification::NotificationSet;
use super::option::JobOptions;
use super::schedule::Schedule;
use super::types::{JobId, PluginConfig};

/// Rank order used when the remote system returns no dispatch settings.
pub const DEFAULT_RANK_ORDER: &str = "ascending";

/// Thread count used when the remote system returns no dispatch settings.
pub const DEFAULT_MAX_THREAD_COUNT: u32 = 1;

/// Execution fan-out policy across nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dispatch {
    pub max_thread_count: u32,
    pub continue_next_node_on_error: bool,
    /// Node attribute used to order nodes.
    pub rank_attribute: String,
    /// `ascending` or `descending`.
    pub rank_order: String,
    pub success_on_empty_node_filter: bool,
}

impl Default for Dispatch {
    fn default() -> Self {
        Self {
            max_thread_count: DEFAULT_MAX_THREAD_COUNT,
            continue_next_node_on_error: false,
            rank_attribute: String::new(),
            rank_order: DEFAULT_RANK_ORDER.to_string(),
            success_on_empty_node_filter: false,
        }
    }
}

/// Include/exclude node query pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeFilter {
    pub query: String,
    pub exclude_query: String,
    /// Exclusions win over inclusions when a node matches both.
    pub exclude_precedence: bool,
}

/// How steps are interleaved across nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderingStrategy {
    /// Run every step on one node before moving to the next node.
    #[default]
    NodeFirst,
    /// Run one step on every node before moving to the next step.
    StepFirst,
    /// Run all nodes in parallel.
    Parallel,
    /// A strategy this crate does not know about, passed through verbatim.
    Other(String),
}

impl OrderingStrategy {
    /// The configuration literal for this strategy.
    pub fn as_str(&self) -> &str {
        match self {
            OrderingStrategy::NodeFirst => "node-first",
            OrderingStrategy::StepFirst => "step-first",
            OrderingStrategy::Parallel => "parallel",
            OrderingStrategy::Other(s) => s,
        }
    }
}

impl From<&str> for OrderingStrategy {
    fn from(s: &str) -> Self {
        match s {
            "node-first" => OrderingStrategy::NodeFirst,
            "step-first" => OrderingStrategy::StepFirst,
            "parallel" => OrderingStrategy::Parallel,
            other => OrderingStrategy::Other(other.to_string()),
        }
    }
}

impl From<String> for OrderingStrategy {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<OrderingStrategy> for String {
    fn from(strategy: OrderingStrategy) -> Self {
        strategy.as_str().to_string()
    }
}

impl fmt::Display for OrderingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A log filter applied to every step of the job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogFilter {
    #[serde(rename = "type")]
    pub filter_type: String,
    pub config: PluginConfig,
}

/// The ordered steps of a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandSequence {
    pub continue_on_error: bool,
    pub ordering_strategy: OrderingStrategy,
    pub commands: Vec<Command>,
    pub global_log_filters: Option<Vec<LogFilter>>,
}

/// A job definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    /// Assigned by the remote system; absent before the first import.
    pub id: Option<JobId>,
    pub name: String,
    pub group_name: String,
    pub project_name: String,
    pub description: String,
    pub execution_enabled: bool,
    pub timeout: String,
    pub schedule_enabled: bool,
    pub time_zone: String,
    pub log_level: String,
    pub allow_concurrent_executions: bool,
    pub retry: String,
    pub dispatch: Option<Dispatch>,
    pub node_filter: Option<NodeFilter>,
    pub schedule: Option<Schedule>,
    pub sequence: CommandSequence,
    pub options: Option<JobOptions>,
    pub notification: Option<NotificationSet>,
}

impl Job {
    /// Create a job in the given project.
    pub fn new(name: impl Into<String>, project_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project_name: project_name.into(),
            execution_enabled: true,
            schedule_enabled: true,
            ..Self::default()
        }
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: impl Into<JobId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Append a step to the command sequence.
    pub fn with_command(mut self, command: Command) -> Self {
        self.sequence.commands.push(command);
        self
    }

    /// Set the schedule.
    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    /// Whether the job has a schedule.
    pub fn is_scheduled(&self) -> bool {
        self.schedule.is_some()
    }

    /// Group and name joined the way the remote UI shows them.
    pub fn full_name(&self) -> String {
        if self.group_name.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.group_name, self.name)
        }
    }
}
