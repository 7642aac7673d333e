use thiserror::Error;

/// Failure of a single cursor read.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum CursorError {
    #[error("buffer underrun: needed {needed} bytes at offset {offset}, only {available} available")]
    BufferUnderrun {
        offset: usize,
        needed: usize,
        available: usize,
    },
}

/// Why an account blob did not produce a record.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// No bytes at all. The account does not exist on chain (yet).
    #[error("account not found")]
    NotFound,

    #[error("malformed {schema} account: {source}")]
    Underrun {
        schema: &'static str,
        #[source]
        source: CursorError,
    },
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("arithmetic overflow")]
    Overflow,

    #[error("arithmetic underflow")]
    Underflow,

    #[error("division by zero")]
    DivisionByZero,
}

/// Rejected persisted [`Numeric`](crate::numeric::Numeric) snapshot.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("expected kind \"Numeric\", found {0:?}")]
    WrongKind(String),

    #[error("bits {0:?} is not an unsigned 128-bit decimal")]
    InvalidBits(String),
}
