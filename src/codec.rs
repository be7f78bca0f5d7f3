use crate::Error;

/// Bidirectional mapping between application bytes and numeral ordinals in
/// `[0, radix)`.
///
/// The alphabet is an ordered sequence of distinct byte values; its length is
/// the radix of the numeral system the FF1 rounds operate on. Duplicate bytes
/// in the input alphabet are tolerated and skipped, keeping the position of
/// their first occurrence.
#[derive(Clone)]
pub struct Codec {
    // Ordinal position to byte value, in first-occurrence order.
    utb: Vec<u8>,
    // Byte value to ordinal position. Only meaningful where `found` is set.
    btu: [u8; 256],
    found: [bool; 256],
}

impl Codec {
    /// Builds a `Codec` from the set of unique bytes in `alphabet`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlphabetTooLarge`] if the alphabet holds more than
    /// 256 unique bytes. Byte input cannot trigger this, but the bound is
    /// checked rather than assumed.
    pub fn new(alphabet: &[u8]) -> Result<Self, Error> {
        let mut codec = Codec {
            utb: Vec::with_capacity(alphabet.len().min(256)),
            btu: [0; 256],
            found: [false; 256],
        };

        for &b in alphabet {
            if codec.found[usize::from(b)] {
                continue;
            }
            if codec.utb.len() >= 256 {
                return Err(Error::AlphabetTooLarge);
            }
            codec.btu[usize::from(b)] = codec.utb.len() as u8;
            codec.found[usize::from(b)] = true;
            codec.utb.push(b);
        }

        Ok(codec)
    }

    /// Returns the size of the alphabet supported by this `Codec`.
    pub fn radix(&self) -> usize {
        self.utb.len()
    }

    /// Encodes a byte slice as the ordinal position of each byte in the
    /// alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlphabetMembership`] naming the position and value of
    /// the first byte that is not in the alphabet.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>, Error> {
        data.iter()
            .enumerate()
            .map(|(pos, &byte)| {
                if self.found[usize::from(byte)] {
                    Ok(self.btu[usize::from(byte)])
                } else {
                    Err(Error::AlphabetMembership { pos, byte })
                }
            })
            .collect()
    }

    /// Decodes an ordinal array back into the bytes of the alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NumeralOutOfRange`] naming the position and value of
    /// the first ordinal that is `>= radix`.
    pub fn decode(&self, numerals: &[u8]) -> Result<Vec<u8>, Error> {
        numerals
            .iter()
            .enumerate()
            .map(|(pos, &value)| {
                self.utb
                    .get(usize::from(value))
                    .copied()
                    .ok_or(Error::NumeralOutOfRange {
                        pos,
                        value,
                        radix: self.utb.len(),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Codec;
    use crate::Error;

    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    #[test]
    fn ascii_alphabet() {
        let codec = Codec::new(b"0123456789abcdefghijklmnopqrstuvwxyz ").unwrap();
        assert_eq!(codec.radix(), 37);

        let numerals = codec.encode(b"hello world").unwrap();
        assert_eq!(numerals, [17, 14, 21, 21, 24, 36, 32, 24, 27, 21, 13]);
        assert_eq!(codec.decode(&numerals).unwrap(), b"hello world");
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let codec = Codec::new(b"hello world").unwrap();
        assert_eq!(codec.radix(), 8);

        let numerals = codec.encode(b"hello world").unwrap();
        assert_eq!(numerals, [0, 1, 2, 2, 3, 4, 5, 3, 6, 2, 7]);
        assert_eq!(codec.decode(&numerals).unwrap(), b"hello world");
    }

    #[test]
    fn raw_byte_alphabet() {
        let alphabet = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A];
        let codec = Codec::new(&alphabet).unwrap();
        assert_eq!(codec.radix(), 11);

        let numerals = codec.encode(&[0x00, 0x05, 0x0A, 0x03, 0x07]).unwrap();
        assert_eq!(numerals, [0, 5, 10, 3, 7]);
    }

    #[test]
    fn empty_alphabet_rejects_everything() {
        let codec = Codec::new(&[]).unwrap();
        assert_eq!(codec.radix(), 0);
        assert_eq!(
            codec.encode(b"hello world"),
            Err(Error::AlphabetMembership { pos: 0, byte: b'h' })
        );
    }

    #[test]
    fn membership_error_names_first_offender() {
        let codec = Codec::new(b"helloworld").unwrap();
        assert_eq!(codec.radix(), 7);
        assert_eq!(
            codec.encode(b"hello world"),
            Err(Error::AlphabetMembership { pos: 5, byte: b' ' })
        );
    }

    #[test]
    fn decode_rejects_out_of_range_numeral() {
        let codec = Codec::new(b"01").unwrap();
        assert_eq!(
            codec.decode(&[0, 1, 2]),
            Err(Error::NumeralOutOfRange {
                pos: 2,
                value: 2,
                radix: 2
            })
        );
    }

    #[test]
    fn full_byte_alphabet() {
        let alphabet = (0..=255).collect::<Vec<u8>>();
        let codec = Codec::new(&alphabet).unwrap();
        assert_eq!(codec.radix(), 256);

        let data = [0x00, 0x55, 0xAA, 0xFF, 0x10, 0x20];
        let numerals = codec.encode(&data).unwrap();
        assert_eq!(codec.decode(&numerals).unwrap(), data);
    }

    #[test]
    fn oversized_alphabet_with_duplicates() {
        let alphabet = (0..300).map(|i| (i % 256) as u8).collect::<Vec<u8>>();
        let codec = Codec::new(&alphabet).unwrap();
        assert_eq!(codec.radix(), 256);
    }

    /// `decode(encode(x)) == x` for any input drawn from the alphabet.
    #[quickcheck]
    fn round_trip(alphabet: Vec<u8>, data: Vec<u8>) -> TestResult {
        let codec = Codec::new(&alphabet).unwrap();
        if codec.radix() == 0 {
            return TestResult::discard();
        }

        let data = data
            .iter()
            .map(|&b| alphabet[usize::from(b) % alphabet.len()])
            .collect::<Vec<u8>>();

        let numerals = codec.encode(&data).unwrap();
        TestResult::from_bool(codec.decode(&numerals).unwrap() == data)
    }
}
