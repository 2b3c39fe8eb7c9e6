//! Option records to and from [`JobOptions`].

use std::collections::HashSet;

use crate::config::types::FlatOption;
use crate::core::option::{JobOption, JobOptions};

use super::error::{OptionRule, TranslateError};

/// Build the option set of a job.
///
/// Returns `None` when no option records are given. Rules are checked per
/// option in a fixed order and the first failure aborts the whole set. Option
/// names must be unique.
pub fn options_from_flat(
    records: &[FlatOption],
    preserve_order: bool,
) -> Result<Option<JobOptions>, TranslateError> {
    if records.is_empty() {
        return Ok(None);
    }

    let mut names = HashSet::with_capacity(records.len());
    let mut options = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let option = option_from_flat(index, record)?;
        if !names.insert(record.name.as_str()) {
            return Err(TranslateError::DuplicateOptionName {
                index,
                name: record.name.clone(),
            });
        }
        options.push(option);
    }

    Ok(Some(JobOptions {
        preserve_order,
        options,
    }))
}

fn option_from_flat(index: usize, record: &FlatOption) -> Result<JobOption, TranslateError> {
    let invalid = |rule| TranslateError::InvalidOption {
        index,
        name: record.name.clone(),
        rule,
    };

    if !record.storage_path.is_empty() && !record.obscure_input {
        return Err(invalid(OptionRule::StoragePathRequiresObscureInput));
    }
    if record.exposed_to_scripts && !record.obscure_input {
        return Err(invalid(OptionRule::ExposedToScriptsRequiresObscureInput));
    }
    if record.is_date && record.date_format.is_empty() {
        return Err(invalid(OptionRule::DateRequiresFormat));
    }

    let mut value_choices = Vec::with_capacity(record.value_choices.len());
    for (position, choice) in record.value_choices.iter().enumerate() {
        match choice.as_deref() {
            Some(value) if !value.is_empty() => value_choices.push(value.to_string()),
            _ => return Err(invalid(OptionRule::EmptyValueChoice { position })),
        }
    }

    Ok(JobOption {
        name: record.name.clone(),
        label: record.label.clone(),
        default_value: record.default_value.clone(),
        value_choices,
        value_choices_url: record.value_choices_url.clone(),
        require_predefined_choice: record.require_predefined_choice,
        validation_regex: record.validation_regex.clone(),
        description: record.description.clone(),
        required: record.required,
        allow_multiple_values: record.allow_multiple_values,
        multi_value_delimiter: record.multi_value_delimiter.clone(),
        obscure_input: record.obscure_input,
        exposed_to_scripts: record.exposed_to_scripts,
        storage_path: record.storage_path.clone(),
        is_date: record.is_date,
        date_format: record.date_format.clone(),
    })
}

/// Flatten an option set. Never fails.
pub fn options_to_flat(options: &JobOptions) -> Vec<FlatOption> {
    options
        .options
        .iter()
        .map(|option| FlatOption {
            name: option.name.clone(),
            label: option.label.clone(),
            default_value: option.default_value.clone(),
            value_choices: option.value_choices.iter().cloned().map(Some).collect(),
            value_choices_url: option.value_choices_url.clone(),
            require_predefined_choice: option.require_predefined_choice,
            validation_regex: option.validation_regex.clone(),
            description: option.description.clone(),
            required: option.required,
            allow_multiple_values: option.allow_multiple_values,
            multi_value_delimiter: option.multi_value_delimiter.clone(),
            obscure_input: option.obscure_input,
            exposed_to_scripts: option.exposed_to_scripts,
            storage_path: option.storage_path.clone(),
            is_date: option.is_date,
            date_format: option.date_format.clone(),
        })
        .collect()
}
