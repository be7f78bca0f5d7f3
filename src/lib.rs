//! Rust implementation of FF1 format-preserving encryption over arbitrary
//! byte alphabets, specified in
//! [NIST Special Publication 800-38G](https://nvlpubs.nist.gov/nistpubs/SpecialPublications/NIST.SP.800-38G.pdf).
//!
//! FF1 is a tweakable, length-preserving cipher: given a key, an optional
//! tweak, and a message drawn from an alphabet of up to 256 distinct byte
//! values, it produces a message of the same length over the same alphabet,
//! reversibly. The alphabet can be anything from ASCII digits to the full
//! byte range.
//!
//! # Example
//!
//! ```rust
//! use alphabet_ff1::Cipher;
//!
//! const KEY: [u8; 16] = [
//!     0x2B, 0x7E, 0x15, 0x16, 0x28, 0xAE, 0xD2, 0xA6, 0xAB, 0xF7, 0x15, 0x88, 0x09, 0xCF,
//!     0x4F, 0x3C,
//! ];
//!
//! let cipher = Cipher::with_alphabet(b"0123456789", 8, &KEY, &[]).unwrap();
//!
//! let ciphertext = cipher.encrypt(b"0123456789").unwrap();
//! assert_eq!(ciphertext, b"2433477484");
//!
//! let plaintext = cipher.decrypt(&ciphertext).unwrap();
//! assert_eq!(plaintext, b"0123456789");
//! ```

#![deny(missing_docs)]

mod ciph;
mod codec;
mod error;
mod ff1;
mod numeral;
mod prf;

pub use crate::{codec::Codec, error::Error, ff1::Cipher};
