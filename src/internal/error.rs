use thiserror::Error;

use crate::tag::TagKind;

/// Unified error type for the Tellus library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A typed accessor was invoked on a tag holding a different variant.
    ///
    /// This is a hard failure: it means decode logic disagrees with the
    /// schema it was written against, which no amount of input massaging can
    /// repair.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: TagKind, actual: TagKind },

    /// A compound tree was required but something else was supplied.
    ///
    /// Malformed input is an expected condition for untrusted persisted
    /// data, so this surfaces as an `Err`, never a panic.
    #[error("structural mismatch: {0}")]
    StructuralMismatch(String),

    /// A tree failed schema verification. Carries the rendered violation
    /// report.
    #[error("schema violation: {0}")]
    SchemaViolation(String),

    /// A required modeled field was absent during decode.
    #[error("missing required field '{0}'")]
    MissingField(String),

    /// An element of the wrong kind was pushed into a homogeneous list.
    #[error("list element kind mismatch: expected {expected}, got {actual}")]
    ListElementMismatch { expected: TagKind, actual: TagKind },

    /// A compound schema node declared two children with the same key.
    #[error("duplicate key '{0}'")]
    DuplicateKey(String),
}

/// A specialized `Result` type for Tellus operations.
pub type Result<T> = std::result::Result<T, Error>;
