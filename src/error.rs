//! # Error Types
//!
//! This module defines the error type used throughout the decoder.
//!
//! Errors fall into three classes:
//! - **Structural** errors reject a whole sentence (wrong type tag, missing
//!   checksum delimiter, oversized content, checksum failures when verification
//!   is enabled).
//! - **Capacity** errors report input that did not fit a bounded store (the raw
//!   epoch buffer or the constellation slot table).
//! - **Publish** errors report a failure to swap in a new snapshot.
//!
//! Field-level problems (an empty field, a value outside its validated range) are
//! never reported as errors: they only leave the field's presence flag unset.

use crate::nmea0183::SentenceType;

/// Convenience alias for results produced by this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Represents all possible errors that can occur while decoding an epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The sentence does not carry the type code the parser expects.
    ///
    /// The type code is read from the three characters following the
    /// `$` and the two-character talker ID.
    #[error("sentence is not a {expected} sentence")]
    TypeMismatch {
        /// The type the parser was asked to decode
        expected: SentenceType,
    },

    /// No `*` checksum delimiter was found in the sentence.
    #[error("checksum delimiter '*' not found")]
    MissingChecksumDelimiter,

    /// The sentence content between `$` and `*` does not fit the working buffer.
    #[error("sentence content of {len} bytes exceeds the {capacity}-byte working buffer")]
    WorkingBufferOverflow {
        /// Length of the sentence content
        len: usize,
        /// Size of the working buffer
        capacity: usize,
    },

    /// The checksum transmitted with the sentence does not match its content.
    ///
    /// Only raised when checksum verification is enabled.
    #[error("checksum mismatch: computed {expected:02X}, sentence carries {found:02X}")]
    ChecksumMismatch {
        /// The checksum calculated from the sentence content
        expected: u8,
        /// The checksum found in the sentence
        found: u8,
    },

    /// The characters following `*` are not a two-digit hexadecimal checksum.
    ///
    /// Only raised when checksum verification is enabled.
    #[error("checksum is not two hexadecimal digits")]
    MalformedChecksum,

    /// The sentence type code is not one of the supported sentence types.
    #[error("unrecognized sentence type")]
    UnrecognizedSentence,

    /// Appending the sentence would exceed the epoch buffer capacity.
    ///
    /// The sentence was not appended; the buffer is unchanged.
    #[error("epoch buffer full: {requested} bytes requested, {available} available")]
    BufferFull {
        /// Bytes needed for the sentence and its terminator
        requested: usize,
        /// Bytes still free in the buffer
        available: usize,
    },

    /// More constellations appeared in one epoch than there are system slots.
    #[error("constellation table full ({capacity} systems)")]
    ConstellationOverflow {
        /// Number of system slots
        capacity: usize,
    },

    /// More GSV fragments arrived for one constellation than can be stored.
    #[error("too many GSV fragments for one system (capacity {capacity})")]
    FragmentOverflow {
        /// Number of fragment slots per system
        capacity: usize,
    },

    /// A GSV message number disagrees with its inferred fragment position.
    ///
    /// Only raised with strict GSV sequencing.
    #[error("GSV message {found} arrived where message {expected} was expected")]
    FragmentOutOfSequence {
        /// Message number implied by the fragment position
        expected: u8,
        /// Message number carried by the sentence
        found: u8,
    },

    /// The published snapshot lock was poisoned by a panicking reader.
    #[error("published snapshot lock poisoned")]
    SnapshotPoisoned,
}

impl Error {
    /// Returns `true` for errors that reject a whole sentence.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::TypeMismatch { .. }
                | Error::MissingChecksumDelimiter
                | Error::WorkingBufferOverflow { .. }
                | Error::ChecksumMismatch { .. }
                | Error::MalformedChecksum
        )
    }

    /// Negative result code for callers that report parse status as an integer.
    ///
    /// `-2` wrong type tag, `-3` missing checksum delimiter, `-4` working buffer
    /// exceeded. Other errors map to `-1`.
    pub fn code(&self) -> i32 {
        match self {
            Error::TypeMismatch { .. } => -2,
            Error::MissingChecksumDelimiter => -3,
            Error::WorkingBufferOverflow { .. } => -4,
            _ => -1,
        }
    }
}
