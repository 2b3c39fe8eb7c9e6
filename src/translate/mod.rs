//! Translation between the flat configuration view and the job model.
//!
//! Every `*_from_flat` function validates and fails fast; every `*_to_flat`
//! function is infallible because it only sees jobs that were validated on the
//! way in or returned by the remote system.

mod command;
mod error;
mod job;
mod notification;
mod options;

pub use command::{
    command_from_flat, command_to_flat, commands_from_flat, error_handler_from_flat,
    error_handler_to_flat,
};
pub use error::{ErrorKind, OptionRule, TranslateError};
pub use job::{
    job_from_flat, job_to_flat, normalize_dispatch, retain_project_name, write_job_to_flat,
};
pub use notification::{MAX_NOTIFICATION_BLOCKS, notifications_from_flat, notifications_to_flat};
pub use options::{options_from_flat, options_to_flat};
