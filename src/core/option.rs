//! Job options presented to users when running a job.

use serde::{Deserialize, Serialize};

/// A single job option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobOption {
    /// Option name, unique within the job.
    pub name: String,
    pub label: String,
    pub default_value: String,
    /// Allowed values, in display order.
    pub value_choices: Vec<String>,
    /// URL returning the allowed values.
    pub value_choices_url: String,
    pub require_predefined_choice: bool,
    pub validation_regex: String,
    pub description: String,
    pub required: bool,
    pub allow_multiple_values: bool,
    pub multi_value_delimiter: String,
    /// Hide the value as it is typed.
    pub obscure_input: bool,
    /// Expose the value to scripts as an environment variable.
    pub exposed_to_scripts: bool,
    /// Key storage path supplying the default value.
    pub storage_path: String,
    pub is_date: bool,
    /// Date format in momentjs notation, e.g. `MM/DD/YYYY hh:mm a`.
    pub date_format: String,
}

impl JobOption {
    /// Create an option with the given name and no constraints.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// The ordered set of options of a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobOptions {
    /// Present options in declaration order rather than alphabetically.
    pub preserve_order: bool,
    pub options: Vec<JobOption>,
}

impl JobOptions {
    /// Find an option by name.
    pub fn get(&self, name: &str) -> Option<&JobOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether there are no options.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
