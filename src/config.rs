// ABOUTME: Constants for the interactive driver's prompt and output

pub const WELCOME_BANNER: &str = "Lispp prompt\nFor exit press Ctrl+D\n";
pub const PROMPT: &str = "Lispp>> ";

/// Prefix written before every printed value and every reported error.
pub const OUTPUT_PREFIX: &str = "     >> ";

pub const HISTORY_FILE: &str = ".lispp_history";
