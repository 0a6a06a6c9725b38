use std::fmt;

/// Every failure a read step or the read operation can produce.
///
/// `Decode` and `Validation` are the low-level kinds raised by the steps.
/// `Read` is the unified kind the top-level operation wraps them into.
/// `Other` carries any failure the read operation does not recognize; it is
/// always propagated unchanged.
#[derive(thiserror::Error, Debug, strum_macros::IntoStaticStr)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("config error: {reason}")]
    Config { reason: String },

    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    pub fn other(err: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self::Other(err.into())
    }

    /// Static variant name, e.g. `"Read"` or `"Other"`.
    pub fn tag(&self) -> &'static str {
        self.into()
    }

    pub fn as_read(&self) -> Option<&ReadError> {
        match self {
            Self::Read(err) => Some(err),
            _ => None,
        }
    }

    /// Display text of this error followed by every `source()` below it.
    pub fn chain(&self) -> Vec<String> {
        let mut out = vec![self.to_string()];
        let mut next = std::error::Error::source(self);
        // a decode error renders the same text as its parser source
        while let Some(err) = next {
            let text = err.to_string();
            if out.last() != Some(&text) {
                out.push(text);
            }
            next = err.source();
        }
        out
    }
}

/// Raw input could not be parsed into any structured form.
#[derive(thiserror::Error, Debug)]
#[error("{message}")]
pub struct DecodeError {
    message: String,
    line: usize,
    column: usize,
    snippet: Option<String>,
    #[source]
    source: serde_json::Error,
}

impl DecodeError {
    pub(crate) fn new(source: serde_json::Error, snippet: Option<String>) -> Self {
        Self {
            message: source.to_string(),
            line: source.line(),
            column: source.column(),
            snippet,
            source,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// 1-based line of the offending character.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the offending character.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Input text surrounding the error position, if it could be located.
    pub fn snippet(&self) -> Option<&str> {
        self.snippet.as_deref()
    }

    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }
}

/// Decoding succeeded but the structure is incomplete or malformed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, strum_macros::IntoStaticStr)]
pub enum ValidationError {
    #[error("No property: {property}")]
    MissingField { property: String },

    #[error("Invalid property {property}: expected {expected}, found {found}")]
    InvalidField {
        property: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Expected an object, found {found}")]
    NotAnObject { found: &'static str },
}

impl ValidationError {
    pub fn missing_field(property: impl Into<String>) -> Self {
        Self::MissingField {
            property: property.into(),
        }
    }

    /// Name of the offending field, for field-scoped failures.
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::MissingField { property } | Self::InvalidField { property, .. } => {
                Some(property)
            }
            Self::NotAnObject { .. } => None,
        }
    }

    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }

    pub fn tag(&self) -> &'static str {
        self.into()
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum ReadErrorKind {
    Syntax,
    Validation,
}

impl ReadErrorKind {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::Syntax => "Syntax Error",
            Self::Validation => "Validation Error",
        }
    }
}

/// The low-level failure a [`ReadError`] was built from.
#[derive(Debug)]
pub enum ReadCause {
    Decode(DecodeError),
    Validation(ValidationError),
}

impl ReadCause {
    pub fn as_error(&self) -> &(dyn std::error::Error + 'static) {
        match self {
            Self::Decode(err) => err,
            Self::Validation(err) => err,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Decode(_) => "Decode",
            Self::Validation(err) => err.tag(),
        }
    }

    pub fn as_decode(&self) -> Option<&DecodeError> {
        match self {
            Self::Decode(err) => Some(err),
            Self::Validation(_) => None,
        }
    }

    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Decode(_) => None,
        }
    }
}

impl fmt::Display for ReadCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(err) => err.fmt(f),
            Self::Validation(err) => err.fmt(f),
        }
    }
}

/// Unified failure of the read operation.
///
/// Displays only the summary message. The original failure is owned as the
/// cause and returned from `source()`, so callers can stop at the summary or
/// walk down to the decode/validation detail.
#[derive(Debug)]
pub struct ReadError {
    kind: ReadErrorKind,
    message: String,
    cause: ReadCause,
}

impl ReadError {
    pub fn syntax(cause: DecodeError) -> Self {
        Self::new(ReadErrorKind::Syntax, ReadCause::Decode(cause))
    }

    pub fn validation(cause: ValidationError) -> Self {
        Self::new(ReadErrorKind::Validation, ReadCause::Validation(cause))
    }

    fn new(kind: ReadErrorKind, cause: ReadCause) -> Self {
        Self {
            kind,
            message: kind.summary().to_string(),
            cause,
        }
    }

    pub fn kind(&self) -> ReadErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> &ReadCause {
        &self.cause
    }

    pub fn into_cause(self) -> ReadCause {
        self.cause
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.cause.as_error())
    }
}
