//! Notification records to and from [`NotificationSet`].

use tracing::warn;

use crate::config::types::{FlatEmail, FlatNotification};
use crate::core::notification::{
    EmailNotification, Notification, NotificationSet, NotificationTrigger, WebHookNotification,
};

use super::command::{plugin_from_flat, plugin_to_flat};
use super::error::TranslateError;

/// Maximum number of notification blocks, one per trigger.
pub const MAX_NOTIFICATION_BLOCKS: usize = NotificationTrigger::ALL.len();

/// Build the notification set of a job.
///
/// Returns `None` when no blocks are given.
pub fn notifications_from_flat(
    records: &[FlatNotification],
) -> Result<Option<NotificationSet>, TranslateError> {
    if records.is_empty() {
        return Ok(None);
    }
    if records.len() > MAX_NOTIFICATION_BLOCKS {
        return Err(TranslateError::TooManyNotificationBlocks(records.len()));
    }

    let mut set = NotificationSet::default();
    for record in records {
        let trigger: NotificationTrigger = record
            .trigger
            .parse()
            .map_err(|_| TranslateError::UnknownNotificationType(record.trigger.clone()))?;

        let notification = notification_from_flat(trigger, record)?;

        let slot = set.slot_mut(trigger);
        if slot.is_some() {
            return Err(TranslateError::DuplicateNotificationType(trigger));
        }
        *slot = Some(notification);
    }

    Ok(Some(set))
}

fn notification_from_flat(
    trigger: NotificationTrigger,
    record: &FlatNotification,
) -> Result<Notification, TranslateError> {
    if record.email.len() > 1 {
        warn!(
            %trigger,
            blocks = record.email.len(),
            "only the first email block of a notification is used"
        );
    }
    let email = record.email.first().map(|email| EmailNotification {
        attach_log: email.attach_log,
        recipients: email.recipients.clone(),
        subject: email.subject.clone(),
    });

    let webhook = (!record.webhook_urls.is_empty()).then(|| WebHookNotification {
        urls: record.webhook_urls.clone(),
        http_method: record.webhook_http_method.clone(),
        format: record.webhook_format.clone(),
    });

    let plugin = match record.plugin.as_slice() {
        [] => None,
        [plugin] => Some(plugin_from_flat(plugin)),
        plugins => {
            return Err(TranslateError::TooManyNotificationPlugins(
                trigger,
                plugins.len(),
            ));
        }
    };

    Ok(Notification {
        email,
        webhook,
        plugin,
    })
}

/// Flatten a notification set, one block per populated trigger in success,
/// failure, start order. Never fails.
pub fn notifications_to_flat(set: &NotificationSet) -> Vec<FlatNotification> {
    set.iter()
        .map(|(trigger, notification)| {
            let (webhook_urls, webhook_http_method, webhook_format) = notification
                .webhook
                .as_ref()
                .map(|webhook| {
                    (
                        webhook.urls.clone(),
                        webhook.http_method.clone(),
                        webhook.format.clone(),
                    )
                })
                .unwrap_or_default();

            FlatNotification {
                trigger: trigger.as_str().to_string(),
                email: notification
                    .email
                    .iter()
                    .map(|email| FlatEmail {
                        attach_log: email.attach_log,
                        recipients: email.recipients.clone(),
                        subject: email.subject.clone(),
                    })
                    .collect(),
                webhook_urls,
                webhook_http_method,
                webhook_format,
                plugin: notification.plugin.iter().map(plugin_to_flat).collect(),
            }
        })
        .collect()
}
