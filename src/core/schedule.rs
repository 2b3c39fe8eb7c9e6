//! Schedule parsing and canonical serialization.
//!
//! Schedules use the 7-field Quartz convention understood by Rundeck:
//! `seconds minute hour day-of-month month day-of-week year`.
//! Day-of-month and day-of-week are mutually exclusive: unless both are `*`,
//! exactly one of them must be the `?` marker.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of whitespace-separated fields in a schedule expression.
pub const SCHEDULE_FIELD_COUNT: usize = 7;

const WILDCARD: &str = "*";
const NO_SPECIFIC_VALUE: &str = "?";

/// Errors that can occur when parsing or validating schedules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The expression does not have exactly seven fields.
    #[error(
        "schedule {expression:?} must be formatted like a Quartz cron expression with 7 fields, got {fields}"
    )]
    Malformed {
        /// The offending expression.
        expression: String,
        /// Number of fields found.
        fields: usize,
    },

    /// Day-of-month and day-of-week are both concrete values.
    #[error(
        "invalid schedule {expression:?}: one of day-of-month ({day_of_month:?}) or day-of-week ({day_of_week:?}) must be '?'"
    )]
    InvalidFields {
        /// The offending expression.
        expression: String,
        /// The 4th field.
        day_of_month: String,
        /// The 6th field.
        day_of_week: String,
    },
}

/// Seconds, minute and hour fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleTime {
    pub seconds: String,
    pub minute: String,
    pub hour: String,
}

/// Day-of-month and month fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleMonth {
    pub day: String,
    pub month: String,
}

/// Day-of-week field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleWeekDay {
    pub day: String,
}

/// Year field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleYear {
    pub year: String,
}

/// A structured job schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    pub time: ScheduleTime,
    pub month: ScheduleMonth,
    pub week_day: ScheduleWeekDay,
    pub year: ScheduleYear,
}

impl Schedule {
    /// Parse a 7-field schedule expression.
    ///
    /// Fields may be separated by any run of whitespace. The result always
    /// satisfies [`Schedule::validate`].
    pub fn decode(expression: &str) -> Result<Self, ScheduleError> {
        let fields: Vec<&str> = expression.split_whitespace().collect();

        let [seconds, minute, hour, day_of_month, month, day_of_week, year] = fields[..] else {
            return Err(ScheduleError::Malformed {
                expression: expression.to_string(),
                fields: fields.len(),
            });
        };

        let schedule = Self {
            time: ScheduleTime {
                seconds: seconds.into(),
                minute: minute.into(),
                hour: hour.into(),
            },
            month: ScheduleMonth {
                day: day_of_month.into(),
                month: month.into(),
            },
            week_day: ScheduleWeekDay {
                day: day_of_week.into(),
            },
            year: ScheduleYear { year: year.into() },
        };

        schedule.check_day_fields(expression)?;
        Ok(schedule)
    }

    /// Serialize to the canonical single-space separated form.
    ///
    /// An empty day-of-month becomes `*` when day-of-week is `*` or empty and
    /// `?` otherwise; an empty day-of-week is defaulted symmetrically. An empty
    /// year becomes `*` so the output always has seven fields. Encoding never
    /// validates: call [`Schedule::validate`] on hand-built schedules.
    pub fn encode(&self) -> String {
        let week_day = self.week_day.day.as_str();
        let day_of_month = match self.month.day.as_str() {
            "" if week_day.is_empty() || week_day == WILDCARD => WILDCARD,
            "" => NO_SPECIFIC_VALUE,
            day => day,
        };
        let day_of_week = match week_day {
            "" if day_of_month == WILDCARD => WILDCARD,
            "" => NO_SPECIFIC_VALUE,
            day => day,
        };
        let year = match self.year.year.as_str() {
            "" => WILDCARD,
            year => year,
        };

        [
            self.time.seconds.as_str(),
            self.time.minute.as_str(),
            self.time.hour.as_str(),
            day_of_month,
            self.month.month.as_str(),
            day_of_week,
            year,
        ]
        .join(" ")
    }

    /// Check that the encoded form of this schedule is accepted by [`Schedule::decode`].
    pub fn validate(&self) -> Result<(), ScheduleError> {
        Self::decode(&self.encode()).map(|_| ())
    }

    fn check_day_fields(&self, expression: &str) -> Result<(), ScheduleError> {
        let day_of_month = self.month.day.as_str();
        let day_of_week = self.week_day.day.as_str();

        let valid = if day_of_month == day_of_week {
            day_of_month == WILDCARD
        } else {
            day_of_month == NO_SPECIFIC_VALUE || day_of_week == NO_SPECIFIC_VALUE
        };

        if valid {
            Ok(())
        } else {
            Err(ScheduleError::InvalidFields {
                expression: expression.to_string(),
                day_of_month: day_of_month.to_string(),
                day_of_week: day_of_week.to_string(),
            })
        }
    }
}

impl FromStr for Schedule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
