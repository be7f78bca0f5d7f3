use cipher::{
    generic_array::{typenum::Unsigned, GenericArray},
    BlockEncrypt,
};

/// The PRF of SP 800-38G: CBC-MAC with a zero IV, absorbing input a block at
/// a time, plus the counter-mode extension that stretches the final MAC block
/// `R` into the `d`-byte string `S`.
///
/// The struct is `Copy` when the block fits in a copyable array, so the state
/// after the common prefix `P || T || padding` can be snapshotted once per
/// call and forked for each Feistel round.
pub(crate) struct Prf<'a, C: BlockEncrypt> {
    cipher: &'a C,
    offset: usize,
    state: GenericArray<u8, C::BlockSize>,
}

impl<'a, C: BlockEncrypt> Copy for Prf<'a, C> where GenericArray<u8, C::BlockSize>: Copy {}

impl<'a, C: BlockEncrypt> Clone for Prf<'a, C>
where
    Self: Copy,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, C: BlockEncrypt> Prf<'a, C>
where
    GenericArray<u8, C::BlockSize>: Copy,
{
    pub fn new(cipher: &'a C) -> Self {
        Self {
            cipher,
            offset: 0,
            state: GenericArray::default(),
        }
    }

    /// Absorbs `buf`: XOR into the current block, encrypting the state each
    /// time a block boundary is reached.
    pub fn write(&mut self, mut buf: &[u8]) {
        let block_size = C::BlockSize::to_usize();

        while !buf.is_empty() {
            let take = (block_size - self.offset).min(buf.len());
            for (state, &input) in self.state[self.offset..self.offset + take]
                .iter_mut()
                .zip(buf)
            {
                *state ^= input;
            }
            self.offset += take;
            buf = &buf[take..];

            if self.offset == block_size {
                self.cipher.encrypt_block(&mut self.state);
                self.offset = 0;
            }
        }
    }

    /// Absorbs `n` zero bytes. XOR with zero leaves the block unchanged, so
    /// only the block encryptions at the boundaries are performed.
    pub fn skip_zeros(&mut self, n: usize) {
        let block_size = C::BlockSize::to_usize();
        let offset = self.offset + n;

        for _ in 0..offset / block_size {
            self.cipher.encrypt_block(&mut self.state);
        }
        self.offset = offset % block_size;
    }

    /// The MAC block `R`. The input absorbed so far must be a whole number of
    /// blocks.
    pub fn output(&self) -> GenericArray<u8, C::BlockSize> {
        assert_eq!(self.offset, 0, "incomplete block");
        self.state
    }

    /// The first `d` bytes of `S = R || CIPH(R ^ [1]) || CIPH(R ^ [2]) || ..`,
    /// where each counter is a 32-bit big-endian integer XORed into the last
    /// four bytes of `R` before encryption.
    pub fn s_bytes(&self, d: usize) -> Vec<u8> {
        let block_size = C::BlockSize::to_usize();
        let r = self.output();

        let mut s = Vec::with_capacity(d + block_size - 1);
        s.extend_from_slice(&r);

        let mut counter: u32 = 1;
        while s.len() < d {
            let mut block = r;
            for (byte, ctr) in block[block_size - 4..]
                .iter_mut()
                .zip(counter.to_be_bytes().iter())
            {
                *byte ^= ctr;
            }
            self.cipher.encrypt_block(&mut block);
            s.extend_from_slice(&block);
            counter += 1;
        }

        s.truncate(d);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::Prf;

    use aes::{
        cipher::{generic_array::GenericArray, NewBlockCipher},
        Aes128,
    };

    use lazy_static::lazy_static;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;
    use rand::RngCore;

    const BLOCK_SIZE: usize = 16;
    const MAX_INPUT_SIZE: usize = 4096;

    lazy_static! {
        static ref CIPHER: Aes128 = {
            const KEY: [u8; 16] = [
                0x2B, 0x7E, 0x15, 0x16, 0x28, 0xAE, 0xD2, 0xA6, 0xAB, 0xF7, 0x15, 0x88, 0x09,
                0xCF, 0x4F, 0x3C,
            ];
            Aes128::new(GenericArray::from_slice(&KEY))
        };
    }

    fn valid_input_size(args: &[usize]) -> bool {
        args.iter()
            .copied()
            .try_fold(0, usize::checked_add)
            .map_or(false, |n| n <= MAX_INPUT_SIZE && n % BLOCK_SIZE == 0)
    }

    fn random_bytes(n: usize) -> Vec<u8> {
        let mut buf = vec![0; n];
        rand::thread_rng().fill_bytes(&mut buf);
        buf
    }

    /// Chunked writes absorb the same MAC as one contiguous write.
    #[quickcheck]
    fn write_chunks_separately(i: usize, j: usize, k: usize) -> TestResult {
        if !valid_input_size(&[i, j, k]) {
            return TestResult::discard();
        }

        let chunks = [random_bytes(i), random_bytes(j), random_bytes(k)];

        let expected = {
            let mut prf = Prf::new(&*CIPHER);
            prf.write(&chunks.concat());
            prf.output()
        };

        let output = {
            let mut prf = Prf::new(&*CIPHER);
            for chunk in &chunks {
                prf.write(chunk);
            }
            prf.output()
        };

        TestResult::from_bool(output == expected)
    }

    /// `skip_zeros` is equivalent to writing zero bytes.
    #[quickcheck]
    fn skip_equivalent_to_zero_write(i: usize, j: usize, k: usize) -> TestResult {
        if !valid_input_size(&[i, j, k]) {
            return TestResult::discard();
        }

        let random = random_bytes(j);

        let expected = {
            let mut buf = vec![0; i + j + k];
            buf[i..i + j].copy_from_slice(&random);
            let mut prf = Prf::new(&*CIPHER);
            prf.write(&buf);
            prf.output()
        };

        let output = {
            let mut prf = Prf::new(&*CIPHER);
            prf.skip_zeros(i);
            prf.write(&random);
            prf.skip_zeros(k);
            prf.output()
        };

        TestResult::from_bool(output == expected)
    }

    /// `S` starts with `R` and has exactly `d` bytes.
    #[quickcheck]
    fn s_prefix_and_length(d: usize) -> TestResult {
        let d = d % 128;

        let mut prf = Prf::new(&*CIPHER);
        prf.write(&[0xA5; BLOCK_SIZE]);
        let r = prf.output();

        let s = prf.s_bytes(d);
        TestResult::from_bool(s.len() == d && s[..d.min(BLOCK_SIZE)] == r[..d.min(BLOCK_SIZE)])
    }

    /// Forked copies diverge independently from the shared prefix.
    #[test]
    fn fork_preserves_prefix_state() {
        let mut prefix = Prf::new(&*CIPHER);
        prefix.write(&[0x5A; BLOCK_SIZE]);

        let mut left = prefix;
        let mut right = prefix;
        left.write(&[1; BLOCK_SIZE]);
        right.write(&[1; BLOCK_SIZE]);
        assert_eq!(left.output(), right.output());

        let mut other = prefix;
        other.write(&[2; BLOCK_SIZE]);
        assert_ne!(left.output(), other.output());
    }
}
