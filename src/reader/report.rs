use tracing::{info, warn};

use crate::error::{Error, ReadErrorKind};
use crate::reader::RecordReader;
use crate::steps::{Decoder, Validator};
use crate::types::Record;

/// How much of a rejected read to surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Detail {
    #[default]
    Summary,
    WithCause,
}

/// A read failure the caller handled locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub kind: ReadErrorKind,
    pub summary: String,
    /// Cause text, present only for [`Detail::WithCause`].
    pub cause: Option<String>,
    /// Cause variant name, present only for [`Detail::WithCause`].
    pub cause_tag: Option<&'static str>,
    /// Offending field, when the cause names one and detail was requested.
    pub property: Option<String>,
}

impl Rejection {
    /// `"Validation Error: No property: name"`, or just the summary.
    pub fn describe(&self) -> String {
        match &self.cause {
            Some(cause) => format!("{}: {cause}", self.summary),
            None => self.summary.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Loaded(Record),
    Rejected(Rejection),
}

/// Run `reader` on `input` and handle the read failures it produces.
///
/// Only [`Error::Read`] is consumed. Every other error is handed back to the
/// caller untouched.
pub fn read_or_reject<D: Decoder, V: Validator>(
    reader: &RecordReader<D, V>,
    input: &str,
    detail: Detail,
) -> Result<ReadOutcome, Error> {
    let read = match reader.read(input) {
        Ok(record) => return Ok(ReadOutcome::Loaded(record)),
        Err(Error::Read(read)) => read,
        Err(other) => return Err(other),
    };

    let rejection = match detail {
        Detail::Summary => Rejection {
            kind: read.kind(),
            summary: read.message().to_string(),
            cause: None,
            cause_tag: None,
            property: None,
        },
        Detail::WithCause => {
            let cause = read.cause();
            Rejection {
                kind: read.kind(),
                summary: read.message().to_string(),
                cause: Some(cause.to_string()),
                cause_tag: Some(cause.tag()),
                property: cause
                    .as_validation()
                    .and_then(|v| v.property())
                    .map(String::from),
            }
        }
    };

    match rejection.kind {
        ReadErrorKind::Syntax => {
            warn!(reason = %rejection.describe(), "rejected malformed input");
        }
        ReadErrorKind::Validation => {
            info!(reason = %rejection.describe(), "rejected incomplete record");
        }
    }
    Ok(ReadOutcome::Rejected(rejection))
}
