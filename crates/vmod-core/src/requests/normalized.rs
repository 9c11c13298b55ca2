//! Lenient normalization results
//!
//! Operator input is shaped, not gatekept: bad optional fields fall back to
//! a safe default and leave an [`InputWarning`] behind, while violated hard
//! requirements come back as `Err(DomainError)`.

use std::fmt;

/// Something the normalizer had to repair or throw away
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputWarning {
    /// A structured field could not be parsed and was replaced by `fallback`
    MalformedInput {
        field: &'static str,
        input: String,
        fallback: String,
    },
    /// Individual tokens of a list field were discarded
    DroppedTokens {
        field: &'static str,
        tokens: Vec<String>,
    },
    /// Whole input lines were discarded (1-based line numbers)
    DroppedLines { lines: Vec<usize> },
}

impl InputWarning {
    pub(crate) fn malformed(field: &'static str, input: &str, fallback: impl Into<String>) -> Self {
        Self::MalformedInput {
            field,
            input: input.to_string(),
            fallback: fallback.into(),
        }
    }

    /// Name of the field the warning is about
    pub fn field(&self) -> &'static str {
        match self {
            Self::MalformedInput { field, .. } | Self::DroppedTokens { field, .. } => field,
            Self::DroppedLines { .. } => "lines",
        }
    }
}

impl fmt::Display for InputWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedInput {
                field,
                input,
                fallback,
            } => write!(f, "{field}: could not parse {input:?}, using {fallback}"),
            Self::DroppedTokens { field, tokens } => {
                write!(f, "{field}: ignored {}", tokens.join(", "))
            }
            Self::DroppedLines { lines } => {
                let lines: Vec<String> = lines.iter().map(ToString::to_string).collect();
                write!(f, "skipped line(s) {}", lines.join(", "))
            }
        }
    }
}

/// A value produced from operator input, plus whatever had to be defaulted
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub value: T,
    pub warnings: Vec<InputWarning>,
}

impl<T> Normalized<T> {
    /// Wrap a value that needed no repair
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Check whether any field fell back to a default
    #[inline]
    pub fn was_defaulted(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check whether a specific field fell back to a default
    pub fn defaulted(&self, field: &str) -> bool {
        self.warnings.iter().any(|w| w.field() == field)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Normalized<U> {
        Normalized {
            value: f(self.value),
            warnings: self.warnings,
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}
