// error.rs - Error types for glob compilation and matching.
//
// Compilation can fail on malformed syntax or on allocation; matching a
// compiled pattern can only fail on allocation.

use std::collections::TryReserveError;

use smallvec::CollectionAllocErr;
use thiserror::Error;

/// Memory allocation failed while building a pattern or a match buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("memory allocation failed")]
pub struct AllocError;

impl From<TryReserveError> for AllocError {
    fn from(_: TryReserveError) -> Self {
        AllocError
    }
}

impl From<CollectionAllocErr> for AllocError {
    fn from(_: CollectionAllocErr) -> Self {
        AllocError
    }
}

/// Error returned when a pattern fails to compile.
///
/// Offsets are rune (code point) indices into the pattern text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The pattern is malformed: `expected` names what the parser needed
    /// at `offset`, `found` is what it saw (`None` at end of pattern).
    #[error("expected {expected} at offset {offset}, found {}", describe_found(.found))]
    Expected {
        expected: &'static str,
        found: Option<char>,
        offset: usize,
    },
    /// The pattern ends in the middle of a token, e.g. a trailing `\`.
    #[error("unexpected end of pattern at offset {offset}")]
    UnexpectedEnd { offset: usize },
    /// Braces nest deeper than [`MAX_GROUP_DEPTH`](crate::parse::MAX_GROUP_DEPTH);
    /// `offset` is the `{` that crossed the limit.
    #[error(
        "brace nesting exceeds {max} levels at offset {offset}",
        max = crate::parse::MAX_GROUP_DEPTH
    )]
    TooDeep { offset: usize },
    /// Allocation failed while building the pattern.
    #[error(transparent)]
    Alloc(#[from] AllocError),
}

fn describe_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("{:?}", c),
        None => "end of pattern".to_string(),
    }
}

/// Error type for the one-shot [`is_match`](crate::api::is_match) helper,
/// which both compiles and matches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Alloc(#[from] AllocError),
}

impl CompileError {
    /// Rune offset into the pattern where the error was detected, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            CompileError::Expected { offset, .. }
            | CompileError::UnexpectedEnd { offset }
            | CompileError::TooDeep { offset } => Some(*offset),
            CompileError::Alloc(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_display_at_end() {
        let err = CompileError::Expected {
            expected: "}",
            found: None,
            offset: 4,
        };
        assert_eq!(err.to_string(), "expected } at offset 4, found end of pattern");
        assert_eq!(err.offset(), Some(4));
    }

    #[test]
    fn expected_display_with_rune() {
        let err = CompileError::Expected {
            expected: "class member",
            found: Some(']'),
            offset: 1,
        };
        assert_eq!(err.to_string(), "expected class member at offset 1, found ']'");
    }

    #[test]
    fn unexpected_end_display() {
        let err = CompileError::UnexpectedEnd { offset: 3 };
        assert_eq!(err.to_string(), "unexpected end of pattern at offset 3");
    }

    #[test]
    fn too_deep_display() {
        let err = CompileError::TooDeep { offset: 256 };
        assert_eq!(err.to_string(), "brace nesting exceeds 256 levels at offset 256");
        assert_eq!(err.offset(), Some(256));
    }

    #[test]
    fn alloc_error_is_transparent() {
        let err = CompileError::from(AllocError);
        assert_eq!(err.to_string(), "memory allocation failed");
        assert_eq!(err.offset(), None);

        let err = Error::from(AllocError);
        assert!(matches!(err, Error::Alloc(AllocError)));
        assert_eq!(err.to_string(), "memory allocation failed");
    }

    #[test]
    fn try_reserve_failure_maps_to_alloc_error() {
        let mut v: Vec<u8> = Vec::new();
        let err = v.try_reserve(usize::MAX).unwrap_err();
        assert_eq!(AllocError::from(err), AllocError);
    }
}
