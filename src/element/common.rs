use super::ElementKind;

// Defaults a freshly dropped select starts with
pub const MIN_SELECT_OPTIONS: usize = 2;
pub const DEFAULT_MAX_OPTIONS: usize = 4;

/// Label a new element gets before the user edits it
pub fn default_label(kind: ElementKind) -> String {
    format!("New {}", kind.as_str())
}

/// Numbered option text, 1-based
pub(crate) fn option_text(position: usize) -> String {
    format!("Option {position}")
}

pub fn default_options() -> Vec<String> {
    (1..=MIN_SELECT_OPTIONS).map(option_text).collect()
}
