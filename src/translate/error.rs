//! Translation error types.

use std::fmt;
use thiserror::Error;

use crate::core::notification::NotificationTrigger;
use crate::core::schedule::ScheduleError;

/// Broad class of a translation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Too many entries in a block that holds at most one.
    StructuralViolation,
    /// A cross-field rule on a single record does not hold.
    FieldInvariantViolation,
    /// A literal outside its allowed set.
    UnknownEnumValue,
    /// Two records claim the same key.
    DuplicateKey,
}

/// Cross-field rule an option failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionRule {
    /// `storage_path` is set but `obscure_input` is false.
    StoragePathRequiresObscureInput,
    /// `exposed_to_scripts` is true but `obscure_input` is false.
    ExposedToScriptsRequiresObscureInput,
    /// `is_date` is true but `date_format` is empty.
    DateRequiresFormat,
    /// An entry of `value_choices` is null or empty.
    EmptyValueChoice { position: usize },
}

impl fmt::Display for OptionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionRule::StoragePathRequiresObscureInput => write!(
                f,
                "argument \"obscure_input\" must be set to `true` when \"storage_path\" is not empty"
            ),
            OptionRule::ExposedToScriptsRequiresObscureInput => write!(
                f,
                "argument \"obscure_input\" must be set to `true` when \"exposed_to_scripts\" is set to true"
            ),
            OptionRule::DateRequiresFormat => write!(
                f,
                "argument \"date_format\" (in momentjs notation) must be set when \"is_date\" is set to true"
            ),
            OptionRule::EmptyValueChoice { position } => write!(
                f,
                "argument \"value_choices\" can not have empty values (entry {}); try \"required\"",
                position
            ),
        }
    }
}

/// Errors raised while assembling a job from flat configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// An at-most-one block has several entries.
    #[error("command may have no more than one {block}, got {count}")]
    TooManyBlocks { block: &'static str, count: usize },

    /// The schedule string could not be parsed or validated.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// An option failed one of its cross-field rules.
    #[error("option {name:?} (#{index}): {rule}")]
    InvalidOption {
        /// Position of the option in the input list.
        index: usize,
        name: String,
        rule: OptionRule,
    },

    /// Two option records share a name.
    #[error("option {name:?} (#{index}) is already defined")]
    DuplicateOptionName {
        /// Position of the repeated option in the input list.
        index: usize,
        name: String,
    },

    /// More than three notification blocks were supplied.
    #[error(
        "can only have up to three notification blocks, `on_success`, `on_failure`, `on_start`; got {0}"
    )]
    TooManyNotificationBlocks(usize),

    /// A notification block names an unknown trigger.
    #[error("the notification type {0:?} is not one of `on_success`, `on_failure`, `on_start`")]
    UnknownNotificationType(String),

    /// A notification block carries several plugins.
    #[error("{0} notification may have no more than one notification plugin, got {1}")]
    TooManyNotificationPlugins(NotificationTrigger, usize),

    /// Two notification blocks share a trigger type.
    #[error("a notification block with {0} already exists")]
    DuplicateNotificationType(NotificationTrigger),
}

impl TranslateError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranslateError::TooManyBlocks { .. }
            | TranslateError::TooManyNotificationBlocks(_)
            | TranslateError::TooManyNotificationPlugins(..)
            | TranslateError::Schedule(ScheduleError::Malformed { .. }) => {
                ErrorKind::StructuralViolation
            }
            TranslateError::Schedule(ScheduleError::InvalidFields { .. })
            | TranslateError::InvalidOption { .. } => ErrorKind::FieldInvariantViolation,
            TranslateError::UnknownNotificationType(_) => ErrorKind::UnknownEnumValue,
            TranslateError::DuplicateNotificationType(_)
            | TranslateError::DuplicateOptionName { .. } => ErrorKind::DuplicateKey,
        }
    }
}
