//! Option-list editing rules for select elements.
//!
//! Every helper returns the full replacement list to send through an update,
//! or `None` when the edit is rejected. Rejections are silent by contract.

use super::common::{MIN_SELECT_OPTIONS, option_text};

/// Append a numbered option unless the list is already at `max_options`.
pub fn add_option(options: &[String], max_options: Option<usize>) -> Option<Vec<String>> {
    if let Some(max) = max_options {
        if options.len() >= max {
            log::debug!("add_option rejected: {} options at cap {}", options.len(), max);
            return None;
        }
    }
    let mut next = options.to_vec();
    next.push(option_text(options.len() + 1));
    Some(next)
}

/// Remove the option at `index`, never going below two options.
pub fn remove_option(options: &[String], index: usize) -> Option<Vec<String>> {
    if options.len() <= MIN_SELECT_OPTIONS || index >= options.len() {
        log::debug!("remove_option rejected: index {} of {}", index, options.len());
        return None;
    }
    let mut next = options.to_vec();
    next.remove(index);
    Some(next)
}

pub fn change_option(options: &[String], index: usize, text: &str) -> Option<Vec<String>> {
    if index >= options.len() {
        return None;
    }
    let mut next = options.to_vec();
    next[index] = text.to_string();
    Some(next)
}

/// Parse user input for the max-options control.
pub fn parse_max_options(input: &str) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(value) if value >= MIN_SELECT_OPTIONS => Some(value),
        _ => None,
    }
}
