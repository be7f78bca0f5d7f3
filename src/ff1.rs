use num::{bigint::BigUint, traits::Pow};

use crate::{
    ciph::Ciph,
    codec::Codec,
    numeral::{num, str_radix, to_fixed_be},
    prf::Prf,
    Error,
};

/// Number of Feistel rounds mandated by SP 800-38G.
const ROUNDS: u8 = 10;

/// Lower bound on the size of the message space, `radix^min_len`. The
/// standard permits 100; raising this to 1_000_000 hardens short messages
/// against meet-in-the-middle attacks at the cost of rejecting them.
const FEISTEL_MIN: u64 = 100;

/// A struct for performing FF1 encryption and decryption over an arbitrary
/// byte alphabet.
///
/// A `Cipher` is immutable after construction and keeps no per-call state,
/// so a single instance can be shared freely across threads.
///
/// Message lengths are bounded by `[min_len, max_len]`, where `min_len` is
/// the smallest length whose message space reaches the Feistel minimum of
/// 100 (never below 2) and `max_len` is the full `2^32 - 1` of the
/// specification; no smaller cap applies.
pub struct Cipher {
    codec: Codec,
    tweak: Vec<u8>,
    ciph: Ciph,
    min_len: usize,
    max_len: usize,
}

impl Cipher {
    /// Creates a `Cipher` over the identity alphabet `[0, 1, .., radix - 1]`:
    /// inputs are sequences of raw numeral values below the radix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRadix`] if `radix` is outside `[2, 256]`, and
    /// the same errors as [`Cipher::with_alphabet`] otherwise.
    pub fn new(
        radix: usize,
        max_tweak_len: usize,
        key: &[u8],
        tweak: &[u8],
    ) -> Result<Self, Error> {
        if radix < 2 || radix > 256 {
            return Err(Error::InvalidRadix(radix));
        }
        let alphabet = (0..radix).map(|b| b as u8).collect::<Vec<u8>>();
        Self::with_alphabet(&alphabet, max_tweak_len, key, tweak)
    }

    /// Creates a `Cipher` over the unique bytes of `alphabet`, in
    /// first-occurrence order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeyLength`] if the key is not 16, 24, or 32
    /// bytes, [`Error::InvalidRadix`] if the alphabet has fewer than 2 or
    /// more than 256 unique bytes, and [`Error::InvalidTweakLength`] if the
    /// tweak is longer than `max_tweak_len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use alphabet_ff1::Cipher;
    ///
    /// let key = [
    ///     0x2B, 0x7E, 0x15, 0x16, 0x28, 0xAE, 0xD2, 0xA6, 0xAB, 0xF7, 0x15, 0x88, 0x09, 0xCF,
    ///     0x4F, 0x3C,
    /// ];
    /// let cipher = Cipher::with_alphabet(b"0123456789", 8, &key, &[])?;
    /// assert_eq!(cipher.encrypt(b"0123456789")?, b"2433477484");
    /// # Ok::<(), alphabet_ff1::Error>(())
    /// ```
    pub fn with_alphabet(
        alphabet: &[u8],
        max_tweak_len: usize,
        key: &[u8],
        tweak: &[u8],
    ) -> Result<Self, Error> {
        let codec = Codec::new(alphabet)?;
        let radix = codec.radix();
        if radix < 2 || radix > 256 {
            return Err(Error::InvalidRadix(radix));
        }

        let ciph = Ciph::new(key)?;

        if tweak.len() > max_tweak_len {
            return Err(Error::InvalidTweakLength {
                len: tweak.len(),
                max: max_tweak_len,
            });
        }

        Ok(Self {
            codec,
            tweak: tweak.to_vec(),
            ciph,
            min_len: min_text_len(radix),
            max_len: u32::MAX as usize,
        })
    }

    /// Encrypts the given plaintext, preserving its length and alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlphabetMembership`] if the plaintext contains a byte
    /// outside the alphabet, and [`Error::InvalidMessageLength`] if its
    /// length is out of bounds.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, Error> {
        let x = self.codec.encode(plaintext)?;
        let n = x.len();
        self.check_len(n)?;

        let radix = self.codec.radix();
        let u = n / 2;
        let v = n - u;
        let b = half_bytes(radix, v);
        let d = ((b + 3) & !3) + 4;

        let mut x_a = x[..u].to_vec();
        let mut x_b = x[u..].to_vec();

        let modulus_u = BigUint::from(radix).pow(u);
        let modulus_v = BigUint::from(radix).pow(v);

        let prefix = self.prefix(u, n, b);

        for i in 0..ROUNDS {
            let mut prf = prefix;
            prf.write(&[i]);
            prf.write(&to_fixed_be(&num(&x_b, radix)?, b));

            let y = BigUint::from_bytes_be(&prf.s_bytes(d));

            let (m, modulus) = if i % 2 == 0 {
                (u, &modulus_u)
            } else {
                (v, &modulus_v)
            };
            let c = (num(&x_a, radix)? + y) % modulus;

            x_a = x_b;
            x_b = str_radix(&c, radix, m);
        }

        x_a.extend_from_slice(&x_b);
        self.codec.decode(&x_a)
    }

    /// Decrypts the given ciphertext.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlphabetMembership`] if the ciphertext contains a
    /// byte outside the alphabet, and [`Error::InvalidMessageLength`] if its
    /// length is out of bounds.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, Error> {
        let x = self.codec.encode(ciphertext)?;
        let n = x.len();
        self.check_len(n)?;

        let radix = self.codec.radix();
        let u = n / 2;
        let v = n - u;
        let b = half_bytes(radix, v);
        let d = ((b + 3) & !3) + 4;

        let mut x_a = x[..u].to_vec();
        let mut x_b = x[u..].to_vec();

        let modulus_u = BigUint::from(radix).pow(u);
        let modulus_v = BigUint::from(radix).pow(v);

        let prefix = self.prefix(u, n, b);

        for i in (0..ROUNDS).rev() {
            let mut prf = prefix;
            prf.write(&[i]);
            prf.write(&to_fixed_be(&num(&x_a, radix)?, b));

            let y = BigUint::from_bytes_be(&prf.s_bytes(d));

            let (m, modulus) = if i % 2 == 0 {
                (u, &modulus_u)
            } else {
                (v, &modulus_v)
            };
            let c = (num(&x_b, radix)? + (modulus - (y % modulus))) % modulus;

            x_b = x_a;
            x_a = str_radix(&c, radix, m);
        }

        x_a.extend_from_slice(&x_b);
        self.codec.decode(&x_a)
    }

    fn check_len(&self, n: usize) -> Result<(), Error> {
        if n < self.min_len || n > self.max_len {
            return Err(Error::InvalidMessageLength {
                len: n,
                min: self.min_len,
                max: self.max_len,
            });
        }
        Ok(())
    }

    /// A PRF primed with the round-independent prefix `P || T || padding`.
    /// Each Feistel round forks a copy and appends `[i] || NUM(half)`.
    fn prefix(&self, u: usize, n: usize, b: usize) -> Prf<'_, Ciph> {
        let t = self.tweak.len();

        let mut prf = Prf::new(&self.ciph);
        prf.write(&p_block(self.codec.radix(), u, n, t));
        prf.write(&self.tweak);
        // [0]^((-t-b-1) mod 16), padding the PRF input to a multiple of the
        // block size once the round byte and the b-byte numeral follow.
        prf.skip_zeros(!(t + b) & 15);
        prf
    }
}

/// The fixed 16-byte block P of SP 800-38G step 5. The leading 1, 2, 1 and
/// the round count are protocol constants.
fn p_block(radix: usize, u: usize, n: usize, t: usize) -> [u8; 16] {
    let mut p = [0; 16];
    p[0] = 1;
    p[1] = 2;
    p[2] = 1;
    p[3..6].copy_from_slice(&(radix as u32).to_be_bytes()[1..]);
    p[6] = ROUNDS;
    p[7] = u as u8;
    p[8..12].copy_from_slice(&(n as u32).to_be_bytes());
    p[12..16].copy_from_slice(&(t as u32).to_be_bytes());
    p
}

/// Smallest length whose message space reaches `FEISTEL_MIN`, clamped to the
/// standard's lower bound of 2 for large radixes.
fn min_text_len(radix: usize) -> usize {
    let mut min_len = 0;
    let mut span: u64 = 1;
    while span < FEISTEL_MIN {
        span *= radix as u64;
        min_len += 1;
    }
    min_len.max(2)
}

/// `b = ceil(ceil(v * log2(radix)) / 8)`, the byte length of the numeric
/// representation of one half.
fn half_bytes(radix: usize, v: usize) -> usize {
    let bits = (v as f64 * (radix as f64).log2()).ceil() as usize;
    (bits + 7) / 8
}
