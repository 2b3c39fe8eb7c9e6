//! Core domain model for scheduled job definitions.

pub mod command;
pub mod job;
pub mod notification;
pub mod option;
pub mod schedule;
pub mod types;
