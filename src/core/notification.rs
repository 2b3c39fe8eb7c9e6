//! Job notifications keyed by trigger type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::command::Plugin;

/// Event that fires a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationTrigger {
    /// The job run succeeded.
    OnSuccess,
    /// The job run failed.
    OnFailure,
    /// The job run started.
    OnStart,
}

impl NotificationTrigger {
    /// All triggers, in the order notifications are written out.
    pub const ALL: [NotificationTrigger; 3] = [
        NotificationTrigger::OnSuccess,
        NotificationTrigger::OnFailure,
        NotificationTrigger::OnStart,
    ];

    /// The configuration literal for this trigger.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationTrigger::OnSuccess => "on_success",
            NotificationTrigger::OnFailure => "on_failure",
            NotificationTrigger::OnStart => "on_start",
        }
    }
}

impl fmt::Display for NotificationTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a trigger literal is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTrigger(pub String);

impl FromStr for NotificationTrigger {
    type Err = UnknownTrigger;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|trigger| trigger.as_str() == s)
            .ok_or_else(|| UnknownTrigger(s.to_string()))
    }
}

/// Email payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailNotification {
    pub attach_log: bool,
    pub recipients: Vec<String>,
    pub subject: String,
}

/// WebHook payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebHookNotification {
    pub urls: Vec<String>,
    /// `get` or `post`.
    pub http_method: String,
    /// `xml` or `json`.
    pub format: String,
}

/// Payloads delivered for one trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notification {
    pub email: Option<EmailNotification>,
    pub webhook: Option<WebHookNotification>,
    pub plugin: Option<Plugin>,
}

/// At most one notification per trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSet {
    pub on_success: Option<Notification>,
    pub on_failure: Option<Notification>,
    pub on_start: Option<Notification>,
}

impl NotificationSet {
    /// The notification for a trigger, if any.
    pub fn get(&self, trigger: NotificationTrigger) -> Option<&Notification> {
        match trigger {
            NotificationTrigger::OnSuccess => self.on_success.as_ref(),
            NotificationTrigger::OnFailure => self.on_failure.as_ref(),
            NotificationTrigger::OnStart => self.on_start.as_ref(),
        }
    }

    /// Mutable access to the slot for a trigger.
    pub fn slot_mut(&mut self, trigger: NotificationTrigger) -> &mut Option<Notification> {
        match trigger {
            NotificationTrigger::OnSuccess => &mut self.on_success,
            NotificationTrigger::OnFailure => &mut self.on_failure,
            NotificationTrigger::OnStart => &mut self.on_start,
        }
    }

    /// Populated slots in success, failure, start order.
    pub fn iter(&self) -> impl Iterator<Item = (NotificationTrigger, &Notification)> {
        NotificationTrigger::ALL
            .into_iter()
            .filter_map(|trigger| self.get(trigger).map(|n| (trigger, n)))
    }

    /// Whether no trigger has a notification.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}
