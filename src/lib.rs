//! Translation between flat job configuration and Rundeck job definitions.
//!
//! A flat record ([`config::FlatJob`]) is what users write; a [`Job`] is what
//! the remote scheduler imports and returns. The [`translate`] module converts
//! between the two, validating on the way in and normalizing on the way out.

pub mod client;
pub mod config;
pub mod core;
pub mod resource;
pub mod testing;
pub mod translate;

pub use client::{ClientError, InMemoryJobClient, JobClient};
pub use config::{ConfigError, FlatJob, JobConfigBuilder, YamlLoader};
pub use core::command::{Command, JobReference, Plugin, ScriptInterpreter};
pub use core::job::{CommandSequence, Dispatch, Job, LogFilter, NodeFilter, OrderingStrategy};
pub use core::notification::{Notification, NotificationSet, NotificationTrigger};
pub use core::option::{JobOption, JobOptions};
pub use core::schedule::{Schedule, ScheduleError};
pub use core::types::{JobId, PluginConfig};
pub use resource::{JobResource, ResourceError};
pub use translate::{ErrorKind, TranslateError, job_from_flat, job_to_flat};
