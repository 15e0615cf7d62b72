//! Execution models — judge status codes, languages, and normalized results.
//!
//! The remote judge reports submissions through 14 numeric status codes.
//! Everything downstream of the polling loop works with the typed
//! `SubmissionStatus` and the normalized `ExecutionResult`.

use serde::{Deserialize, Serialize};

/// Flavors of runtime failure the judge distinguishes (codes 7–12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeErrorKind {
    Sigsegv,
    Sigxfsz,
    Sigfpe,
    Sigabrt,
    NonZeroExit,
    Other,
}

/// Typed view of the judge's numeric submission status.
///
/// `InQueue` and `Processing` are the only pending states; every other
/// status is terminal and ends the polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    InQueue,
    Processing,
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    CompilationError,
    RuntimeError(RuntimeErrorKind),
    InternalError,
    ExecFormatError,
    /// Status code outside the documented table.
    Unknown(u16),
}

impl SubmissionStatus {
    /// Maps the judge's raw numeric code to a typed status.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => SubmissionStatus::InQueue,
            2 => SubmissionStatus::Processing,
            3 => SubmissionStatus::Accepted,
            4 => SubmissionStatus::WrongAnswer,
            5 => SubmissionStatus::TimeLimitExceeded,
            6 => SubmissionStatus::CompilationError,
            7 => SubmissionStatus::RuntimeError(RuntimeErrorKind::Sigsegv),
            8 => SubmissionStatus::RuntimeError(RuntimeErrorKind::Sigxfsz),
            9 => SubmissionStatus::RuntimeError(RuntimeErrorKind::Sigfpe),
            10 => SubmissionStatus::RuntimeError(RuntimeErrorKind::Sigabrt),
            11 => SubmissionStatus::RuntimeError(RuntimeErrorKind::NonZeroExit),
            12 => SubmissionStatus::RuntimeError(RuntimeErrorKind::Other),
            13 => SubmissionStatus::InternalError,
            14 => SubmissionStatus::ExecFormatError,
            other => SubmissionStatus::Unknown(other),
        }
    }

    /// True while the judge is still working on the submission.
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionStatus::InQueue | SubmissionStatus::Processing)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }
}

/// Normalized outcome of one test case run against the judge.
///
/// `passed` is true iff the status is `Accepted`. `output` carries whatever
/// the run produced, in stdout > stderr > compile_output precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub status: SubmissionStatus,
    pub passed: bool,
    pub output: Option<String>,
    pub error: Option<String>,
    /// Wall time in seconds, when the judge reports it.
    pub time: Option<f64>,
    /// Peak memory in kilobytes, when the judge reports it.
    pub memory: Option<u64>,
}

/// Languages the judge accepts, with their fixed submission ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    Python,
    Java,
    Cpp,
    C,
    CSharp,
}

impl Language {
    /// The judge's numeric language id. This table is part of the external
    /// contract and must not drift.
    pub fn judge_id(&self) -> u32 {
        match self {
            Language::JavaScript => 63,
            Language::Python => 71,
            Language::Java => 62,
            Language::Cpp => 54,
            Language::C => 50,
            Language::CSharp => 51,
        }
    }

    pub fn from_judge_id(id: u32) -> Option<Self> {
        match id {
            63 => Some(Language::JavaScript),
            71 => Some(Language::Python),
            62 => Some(Language::Java),
            54 => Some(Language::Cpp),
            50 => Some(Language::C),
            51 => Some(Language::CSharp),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_table_maps_all_documented_codes() {
        assert_eq!(SubmissionStatus::from_code(1), SubmissionStatus::InQueue);
        assert_eq!(SubmissionStatus::from_code(2), SubmissionStatus::Processing);
        assert_eq!(SubmissionStatus::from_code(3), SubmissionStatus::Accepted);
        assert_eq!(SubmissionStatus::from_code(4), SubmissionStatus::WrongAnswer);
        assert_eq!(
            SubmissionStatus::from_code(5),
            SubmissionStatus::TimeLimitExceeded
        );
        assert_eq!(
            SubmissionStatus::from_code(6),
            SubmissionStatus::CompilationError
        );
        for code in 7..=12 {
            assert!(matches!(
                SubmissionStatus::from_code(code),
                SubmissionStatus::RuntimeError(_)
            ));
        }
        assert_eq!(
            SubmissionStatus::from_code(13),
            SubmissionStatus::InternalError
        );
        assert_eq!(
            SubmissionStatus::from_code(14),
            SubmissionStatus::ExecFormatError
        );
    }

    #[test]
    fn undocumented_code_maps_to_unknown() {
        assert_eq!(
            SubmissionStatus::from_code(99),
            SubmissionStatus::Unknown(99)
        );
        assert!(SubmissionStatus::from_code(99).is_terminal());
    }

    #[test]
    fn only_queue_and_processing_are_pending() {
        assert!(SubmissionStatus::InQueue.is_pending());
        assert!(SubmissionStatus::Processing.is_pending());
        assert!(SubmissionStatus::Accepted.is_terminal());
        assert!(SubmissionStatus::WrongAnswer.is_terminal());
        assert!(SubmissionStatus::RuntimeError(RuntimeErrorKind::Sigsegv).is_terminal());
    }

    #[test]
    fn language_id_table_is_exact() {
        assert_eq!(Language::JavaScript.judge_id(), 63);
        assert_eq!(Language::Python.judge_id(), 71);
        assert_eq!(Language::Java.judge_id(), 62);
        assert_eq!(Language::Cpp.judge_id(), 54);
        assert_eq!(Language::C.judge_id(), 50);
        assert_eq!(Language::CSharp.judge_id(), 51);
    }

    #[test]
    fn language_id_round_trips() {
        for lang in [
            Language::JavaScript,
            Language::Python,
            Language::Java,
            Language::Cpp,
            Language::C,
            Language::CSharp,
        ] {
            assert_eq!(Language::from_judge_id(lang.judge_id()), Some(lang));
        }
        assert_eq!(Language::from_judge_id(999), None);
    }
}
