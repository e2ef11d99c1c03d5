//! Errors returned by tree and cursor operations.
//!
//! A missing key is not an error: [`Tree::search`][crate::Tree::search] and
//! [`Tree::delete`][crate::Tree::delete] report it with `None`.

use std::collections::TryReserveError;

use thiserror::Error;

/// Everything that can go wrong when using a [`Tree`][crate::Tree] or a
/// [`Cursor`][crate::Cursor].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Storage for a new key could not be allocated. The tree is left exactly as it was.
    #[error("out of memory while copying a key of {len} bytes")]
    OutOfMemory {
        /// Length of the key that could not be copied.
        len: usize,
    },
    /// The operation is not valid in the current state, e.g. reading the current key of a
    /// cursor that has already yielded every entry.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}

impl Error {
    pub(crate) fn out_of_memory(len: usize, source: TryReserveError) -> Self {
        log::debug!("Could not reserve {} bytes for a key: {}", len, source);
        Self::OutOfMemory { len }
    }
}

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            Error::OutOfMemory { len: 3 }.to_string(),
            "out of memory while copying a key of 3 bytes"
        );
        assert_eq!(
            Error::InvalidState("cursor is at end").to_string(),
            "invalid state: cursor is at end"
        );
    }

    #[test]
    fn out_of_memory_from_failed_reservation() {
        let mut buf = String::new();
        let source = buf.try_reserve_exact(usize::MAX).unwrap_err();

        assert_eq!(
            Error::out_of_memory(usize::MAX, source),
            Error::OutOfMemory { len: usize::MAX }
        );
    }
}
