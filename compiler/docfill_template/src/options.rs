//! Template configuration.

use docfill_diagnostic::errors::invalid_pattern;
use docfill_diagnostic::Result;
use docfill_eval::format::{DEFAULT_DATETIME_FORMAT, DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT};
use docfill_eval::{Formats, NumberPattern};
use docfill_parse::ParseOptions;

/// The literal markers around a placeholder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delimiters {
    pub start: String,
    pub end: String,
}

impl Delimiters {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Delimiters {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Both markers must be non-empty.
    pub fn validate(&self) -> Result<()> {
        for marker in [&self.start, &self.end] {
            if marker.is_empty() {
                return Err(invalid_pattern(
                    &format!("{} {}", self.start, self.end),
                    "placeholder delimiters must not be empty",
                ));
            }
        }
        Ok(())
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Delimiters::new("{", "}")
    }
}

/// Options fixed when a template is compiled.
///
/// ```ignore
/// let options = TemplateOptions::default()
///     .delimiters("${", "}")
///     .number_format("#,##0")
///     .vertical(true);
/// ```
#[derive(Clone, Debug)]
pub struct TemplateOptions {
    pub delimiters: Delimiters,
    /// Pattern for numbers written into text; `None` prints them normalized.
    pub number_format: Option<String>,
    pub date_format: String,
    pub time_format: String,
    pub datetime_format: String,
    /// Write substituted digits as kanji numerals.
    pub vertical: bool,
    /// Name of the iteration counter in repeat bodies that do not name one.
    pub index_name: String,
    pub parse: ParseOptions,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        TemplateOptions {
            delimiters: Delimiters::default(),
            number_format: None,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            vertical: false,
            index_name: "index".to_string(),
            parse: ParseOptions::default(),
        }
    }
}

impl TemplateOptions {
    #[must_use]
    pub fn delimiters(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.delimiters = Delimiters::new(start, end);
        self
    }

    #[must_use]
    pub fn number_format(mut self, pattern: impl Into<String>) -> Self {
        self.number_format = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn date_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_format = pattern.into();
        self
    }

    #[must_use]
    pub fn time_format(mut self, pattern: impl Into<String>) -> Self {
        self.time_format = pattern.into();
        self
    }

    #[must_use]
    pub fn datetime_format(mut self, pattern: impl Into<String>) -> Self {
        self.datetime_format = pattern.into();
        self
    }

    #[must_use]
    pub fn vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self
    }

    #[must_use]
    pub fn index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = name.into();
        self
    }

    #[must_use]
    pub fn parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Validate the patterns and build the value formatter.
    pub fn formats(&self) -> Result<Formats> {
        for pattern in [&self.date_format, &self.time_format, &self.datetime_format] {
            docfill_eval::format::strftime_items(pattern)?;
        }
        Ok(Formats {
            number: self.number_format.as_deref().map(NumberPattern::parse).transpose()?,
            date: self.date_format.clone(),
            time: self.time_format.clone(),
            datetime: self.datetime_format.clone(),
        })
    }
}
