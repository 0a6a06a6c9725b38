pub mod report;

use tracing::{debug, warn};

use crate::error::{Error, ReadError};
use crate::steps::{Decoder, JsonDecoder, RequiredFields, Validator};
use crate::types::{Record, ValidationPolicy};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum ReadStage {
    Start,
    Decoding,
    Validating,
    Success,
    WrappedFail,
    UnknownFail,
}

/// Result of running the step owned by the current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Passed,
    /// Failed with the kind this stage wraps.
    Recognized,
    /// Failed with any other kind.
    Unrecognized,
}

impl ReadStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::WrappedFail | Self::UnknownFail)
    }

    pub fn next(self, outcome: StepOutcome) -> ReadStage {
        match (self, outcome) {
            (Self::Start, _) => Self::Decoding,
            (Self::Decoding, StepOutcome::Passed) => Self::Validating,
            (Self::Validating, StepOutcome::Passed) => Self::Success,
            (Self::Decoding | Self::Validating, StepOutcome::Recognized) => Self::WrappedFail,
            (Self::Decoding | Self::Validating, StepOutcome::Unrecognized) => Self::UnknownFail,
            (terminal, _) => terminal,
        }
    }

    /// Whether a failure raised in this stage is one the reader wraps.
    pub fn recognizes(self, err: &Error) -> bool {
        matches!(
            (self, err),
            (Self::Decoding, Error::Decode(_)) | (Self::Validating, Error::Validation(_))
        )
    }

    pub fn outcome_of<T>(self, result: &Result<T, Error>) -> StepOutcome {
        match result {
            Ok(_) => StepOutcome::Passed,
            Err(err) if self.recognizes(err) => StepOutcome::Recognized,
            Err(_) => StepOutcome::Unrecognized,
        }
    }
}

/// Decode-then-validate reader that wraps the failures it recognizes.
#[derive(Debug, Clone, Default)]
pub struct RecordReader<D = JsonDecoder, V = RequiredFields> {
    decoder: D,
    validator: V,
}

impl RecordReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ValidationPolicy) -> Self {
        Self::with_steps(JsonDecoder, RequiredFields::new(policy))
    }
}

impl<D: Decoder, V: Validator> RecordReader<D, V> {
    pub fn with_steps(decoder: D, validator: V) -> Self {
        Self { decoder, validator }
    }

    /// Decode and validate `input`.
    ///
    /// A decode failure comes back as [`Error::Read`] with kind `syntax`, a
    /// validation failure as [`Error::Read`] with kind `validation`; the
    /// original failure is kept as the cause. Anything else either step
    /// returns is propagated as is.
    pub fn read(&self, input: &str) -> Result<Record, Error> {
        let stage = ReadStage::Start.next(StepOutcome::Passed);
        let decoded = self.decoder.decode(input);
        let record = settle(stage, decoded)?;

        let stage = stage.next(StepOutcome::Passed);
        let validated = self.validator.validate(record);
        let record = settle(stage, validated)?;

        debug!(stage = %stage.next(StepOutcome::Passed), "record read");
        Ok(record)
    }
}

/// Read `input` with the JSON decoder and the default validation policy.
pub fn read_record(input: &str) -> Result<Record, Error> {
    RecordReader::new().read(input)
}

fn settle<T>(stage: ReadStage, result: Result<T, Error>) -> Result<T, Error> {
    let terminal = stage.next(stage.outcome_of(&result));
    let err = match result {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    match err {
        Error::Decode(cause) if stage == ReadStage::Decoding => {
            debug!(%stage, %terminal, error = %cause, "wrapping decode failure");
            Err(ReadError::syntax(cause).into())
        }
        Error::Validation(cause) if stage == ReadStage::Validating => {
            debug!(%stage, %terminal, error = %cause, "wrapping validation failure");
            Err(ReadError::validation(cause).into())
        }
        other => {
            warn!(
                %stage,
                %terminal,
                kind = other.tag(),
                error = %other,
                "unrecognized failure propagated"
            );
            Err(other)
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, clippy::panic, reason = "test assertions")]
mod tests {
    use super::*;
    use crate::error::{ReadCause, ReadErrorKind, ValidationError};
    use crate::types::RequiredField;

    struct FailingDecoder;

    impl Decoder for FailingDecoder {
        fn decode(&self, _input: &str) -> Result<Record, Error> {
            Err(Error::other("decoder backend unavailable"))
        }
    }

    /// Raises a validation error from the decode stage.
    struct MisplacedDecoder;

    impl Decoder for MisplacedDecoder {
        fn decode(&self, _input: &str) -> Result<Record, Error> {
            Err(ValidationError::missing_field("id").into())
        }
    }

    struct FailingValidator;

    impl Validator for FailingValidator {
        fn validate(&self, _record: Record) -> Result<Record, Error> {
            Err(Error::Config {
                reason: "validator not configured".into(),
            })
        }
    }

    fn lcg_next(state: &mut u64) -> u64 {
        *state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1);
        *state
    }

    fn random_outcome(state: &mut u64) -> StepOutcome {
        match lcg_next(state) % 3 {
            0 => StepOutcome::Passed,
            1 => StepOutcome::Recognized,
            _ => StepOutcome::Unrecognized,
        }
    }

    #[test]
    fn valid_input_is_returned_as_decoded() {
        let record = read_record(r#"{"name":"John","age":30}"#).unwrap();
        assert_eq!(record.name(), Some("John"));
        assert_eq!(record.age(), Some(30.0));
        assert_eq!(
            record.into_value(),
            serde_json::json!({"name": "John", "age": 30})
        );
    }

    #[test]
    fn syntax_errors_are_wrapped() {
        let err = read_record("{bad json}").unwrap_err();
        let read = err.as_read().unwrap();
        assert_eq!(read.kind(), ReadErrorKind::Syntax);
        assert_eq!(read.message(), "Syntax Error");
        assert!(matches!(read.cause(), ReadCause::Decode(_)));
    }

    #[test]
    fn missing_fields_are_wrapped() {
        let Error::Read(read) = read_record(r#"{"age": 25}"#).unwrap_err() else {
            panic!("expected a read error");
        };
        assert_eq!(read.kind(), ReadErrorKind::Validation);
        assert_eq!(read.message(), "Validation Error");
        assert_eq!(
            read.cause().as_validation(),
            Some(&ValidationError::missing_field("name"))
        );
    }

    #[test]
    fn reader_policy_changes_reported_field() {
        let reader = RecordReader::with_policy(
            ValidationPolicy::new(vec![RequiredField::Name, RequiredField::Age]).unwrap(),
        );
        let err = reader.read("{}").unwrap_err();
        assert_eq!(
            err.as_read()
                .and_then(|r| r.cause().as_validation())
                .and_then(ValidationError::property),
            Some("name")
        );
    }

    #[test]
    fn unrecognized_decode_failure_propagates_unchanged() {
        let reader = RecordReader::with_steps(FailingDecoder, RequiredFields::default());
        let err = reader.read(r#"{"name":"John","age":30}"#).unwrap_err();
        assert!(matches!(err, Error::Other(_)));
        assert_eq!(err.to_string(), "decoder backend unavailable");
    }

    #[test]
    fn validation_error_from_decoder_is_not_wrapped() {
        let reader = RecordReader::with_steps(MisplacedDecoder, RequiredFields::default());
        let err = reader.read("{}").unwrap_err();
        assert!(matches!(err, Error::Validation(ref v) if v.property() == Some("id")));
    }

    #[test]
    fn unrecognized_validate_failure_propagates_unchanged() {
        let reader = RecordReader::with_steps(JsonDecoder, FailingValidator);
        let err = reader.read(r#"{"name":"John","age":30}"#).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));

        // decode failures are still wrapped ahead of the broken validator
        let err = reader.read("{bad json}").unwrap_err();
        assert!(err.as_read().is_some());
    }

    #[test]
    fn stage_names() {
        assert_eq!(ReadStage::WrappedFail.to_string(), "wrapped_fail");
        assert_eq!(
            "unknown_fail".parse::<ReadStage>().ok(),
            Some(ReadStage::UnknownFail)
        );
    }

    #[test]
    fn stage_recognizes_only_its_own_kind() {
        let decode_err = crate::steps::JsonDecoder.decode("{").unwrap_err();
        let validation_err = Error::from(ValidationError::missing_field("age"));

        assert!(ReadStage::Decoding.recognizes(&decode_err));
        assert!(!ReadStage::Decoding.recognizes(&validation_err));
        assert!(ReadStage::Validating.recognizes(&validation_err));
        assert!(!ReadStage::Validating.recognizes(&decode_err));
        assert!(!ReadStage::Success.recognizes(&validation_err));
    }

    #[test]
    fn terminal_stages_absorb_every_outcome() {
        let mut seed = 0xDEAD_BEEF_u64;
        for stage in [
            ReadStage::Success,
            ReadStage::WrappedFail,
            ReadStage::UnknownFail,
        ] {
            for _ in 0..3_000 {
                assert_eq!(stage.next(random_outcome(&mut seed)), stage);
            }
        }
    }

    #[test]
    fn every_run_terminates_within_three_transitions() {
        let mut seed = 0x00C0_FFEE_u64;
        for _ in 0..10_000 {
            let mut stage = ReadStage::Start;
            let mut steps = 0;
            while !stage.is_terminal() {
                stage = stage.next(random_outcome(&mut seed));
                steps += 1;
                assert!(steps <= 3, "did not terminate: {stage}");
            }
            assert_ne!(stage, ReadStage::Start);
        }
    }

    #[test]
    fn stage_sequence_for_each_terminal() {
        let start = ReadStage::Start.next(StepOutcome::Passed);
        assert_eq!(start, ReadStage::Decoding);
        assert_eq!(
            start.next(StepOutcome::Passed).next(StepOutcome::Passed),
            ReadStage::Success
        );
        assert_eq!(start.next(StepOutcome::Recognized), ReadStage::WrappedFail);
        assert_eq!(
            start
                .next(StepOutcome::Passed)
                .next(StepOutcome::Unrecognized),
            ReadStage::UnknownFail
        );
    }
}
