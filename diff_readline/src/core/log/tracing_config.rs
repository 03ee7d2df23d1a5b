// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing_core::LevelFilter;

/// Log file used when the caller asks for file output without naming one.
pub const DEFAULT_LOG_FILE_NAME: &str = "diff_readline_log.txt";

/// Where log output goes and how much of it. Pass this to
/// [`crate::try_initialize_logging_global`] once at startup.
///
/// While the prompt owns the terminal, logging to [`DisplayPreference::Stdout`] will
/// interleave with the rendered frame. Prefer a file, or stderr redirected elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level: tracing::Level,
}

/// The `String` payload is the path of the log file, eg: `/tmp/prompt_demo.log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl TracingConfig {
    #[must_use]
    pub fn new_file(filename: Option<String>) -> Self {
        Self {
            writer_config: WriterConfig::File(file_name_or_default(filename)),
            level: tracing::Level::DEBUG,
        }
    }

    #[must_use]
    pub fn new_display(preferred_display: DisplayPreference) -> Self {
        Self {
            writer_config: WriterConfig::Display(preferred_display),
            level: tracing::Level::DEBUG,
        }
    }

    #[must_use]
    pub fn new_file_and_display(
        filename: Option<String>,
        preferred_display: DisplayPreference,
    ) -> Self {
        Self {
            writer_config: WriterConfig::DisplayAndFile(
                preferred_display,
                file_name_or_default(filename),
            ),
            level: tracing::Level::DEBUG,
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self {
            writer_config: WriterConfig::None,
            level: tracing::Level::INFO,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { LevelFilter::from_level(self.level) }
}

fn file_name_or_default(filename: Option<String>) -> String {
    filename.unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_file_uses_default_name() {
        let config = TracingConfig::new_file(None);
        assert_eq!(
            config.get_writer_config(),
            WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string())
        );
        assert_eq!(config.get_level_filter(), LevelFilter::DEBUG);
    }

    #[test]
    fn test_new_display_writes_nowhere_else() {
        let config = TracingConfig::new_display(DisplayPreference::Stderr);
        assert_eq!(
            config.get_writer_config(),
            WriterConfig::Display(DisplayPreference::Stderr)
        );
    }

    #[test]
    fn test_new_file_and_display_keeps_both_targets() {
        let config = TracingConfig::new_file_and_display(
            Some("prompt.log".into()),
            DisplayPreference::Stderr,
        )
        .with_level(tracing::Level::TRACE);
        assert_eq!(
            config.get_writer_config(),
            WriterConfig::DisplayAndFile(DisplayPreference::Stderr, "prompt.log".into())
        );
        assert_eq!(config.get_level_filter(), LevelFilter::TRACE);
    }
}
