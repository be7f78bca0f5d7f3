use thiserror::Error;

/// Errors related to FF1 encryption and decryption.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum Error {
    /// AES key length is not 16, 24, or 32 bytes.
    #[error("invalid key length {0}, must be 16, 24, or 32 bytes")]
    InvalidKeyLength(usize),
    /// Alphabet size is outside the supported range.
    #[error("invalid radix {0}, must be in [2..256]")]
    InvalidRadix(usize),
    /// Tweak is longer than the maximum configured at construction.
    #[error("tweak length {len} exceeds maximum {max}")]
    InvalidTweakLength {
        /// Length of the supplied tweak.
        len: usize,
        /// Maximum tweak length the cipher was built with.
        max: usize,
    },
    /// Input length is outside the bounds derived from the radix.
    #[error("message length {len} out of range [{min}..{max}]")]
    InvalidMessageLength {
        /// Length of the supplied input.
        len: usize,
        /// Minimum supported message length.
        min: usize,
        /// Maximum supported message length.
        max: usize,
    },
    /// Input contains a byte that is not in the alphabet.
    #[error("byte at position {pos} is not in alphabet: 0x{byte:02x}")]
    AlphabetMembership {
        /// Position of the offending byte.
        pos: usize,
        /// The offending byte value.
        byte: u8,
    },
    /// A numeral is too large for the radix.
    #[error("numeral at position {pos} out of range: {value} not in [0..{radix})")]
    NumeralOutOfRange {
        /// Position of the offending numeral.
        pos: usize,
        /// The offending numeral value.
        value: u8,
        /// Radix the numeral was checked against.
        radix: usize,
    },
    /// Alphabet contains more than 256 unique bytes. Cannot arise from byte
    /// input, but guarded explicitly.
    #[error("alphabet must contain no more than 256 unique bytes")]
    AlphabetTooLarge,
}
