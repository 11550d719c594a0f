//! Generator configuration.

use super::segment::Delimiters;

/// Relationship code that marks the subscriber (X12 "self").
pub const SUBSCRIBER_RELATIONSHIP_CODE: &str = "18";

/// ISA15 usage indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UsageIndicator {
    /// Production data (`P`)
    #[default]
    Production,
    /// Test data (`T`)
    Test,
}

impl UsageIndicator {
    pub fn code(&self) -> &'static str {
        match self {
            UsageIndicator::Production => "P",
            UsageIndicator::Test => "T",
        }
    }
}

/// Options for generating an 834 interchange.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Separator characters
    pub delimiters: Delimiters,

    /// Text placed between rendered segments (after each terminator)
    pub line_separator: String,

    /// ISA15 usage indicator
    pub usage: UsageIndicator,

    /// Relationship code that yields INS01 = "Y"
    pub subscriber_code: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            delimiters: Delimiters::default(),
            line_separator: "\n".to_string(),
            usage: UsageIndicator::default(),
            subscriber_code: SUBSCRIBER_RELATIONSHIP_CODE.to_string(),
        }
    }
}

impl GeneratorOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the separator characters.
    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    /// Set the text between segments (e.g. `""`, `"\n"`, `"\r\n"`).
    pub fn with_line_separator(mut self, separator: impl Into<String>) -> Self {
        self.line_separator = separator.into();
        self
    }

    /// Set the usage indicator.
    pub fn with_usage(mut self, usage: UsageIndicator) -> Self {
        self.usage = usage;
        self
    }

    /// Set the relationship code treated as the subscriber.
    pub fn with_subscriber_code(mut self, code: impl Into<String>) -> Self {
        self.subscriber_code = code.into();
        self
    }
}
