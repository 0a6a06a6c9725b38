#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod error;
pub mod reader;
pub mod steps;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{DecodeError, Error, ReadCause, ReadError, ReadErrorKind, ValidationError};
pub use reader::report::{Detail, ReadOutcome, Rejection, read_or_reject};
pub use reader::{ReadStage, RecordReader, StepOutcome, read_record};
pub use steps::{Decoder, JsonDecoder, RequiredFields, Validator, decode, validate};
pub use types::{Record, RequiredField, ValidationPolicy};
