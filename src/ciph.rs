use aes::{Aes128, Aes192, Aes256};
use cipher::{
    generic_array::{
        typenum::{U1, U16},
        GenericArray,
    },
    Block, BlockCipher, BlockEncrypt, NewBlockCipher,
};

use crate::Error;

/// The keyed block cipher CIPH of SP 800-38G: single-block AES encryption,
/// with the variant selected by key length.
///
/// All three variants are stateless once keyed, so a `Ciph` can be shared
/// across threads.
pub(crate) enum Ciph {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl Ciph {
    /// Keys AES-128, AES-192, or AES-256 depending on the key length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeyLength`] if the key is not 16, 24, or 32
    /// bytes.
    pub fn new(key: &[u8]) -> Result<Self, Error> {
        match key.len() {
            16 => Ok(Ciph::Aes128(Aes128::new(GenericArray::from_slice(key)))),
            24 => Ok(Ciph::Aes192(Aes192::new(GenericArray::from_slice(key)))),
            32 => Ok(Ciph::Aes256(Aes256::new(GenericArray::from_slice(key)))),
            len => Err(Error::InvalidKeyLength(len)),
        }
    }
}

impl BlockCipher for Ciph {
    type BlockSize = U16;
    type ParBlocks = U1;
}

impl BlockEncrypt for Ciph {
    fn encrypt_block(&self, block: &mut Block<Self>) {
        match self {
            Ciph::Aes128(aes) => aes.encrypt_block(block),
            Ciph::Aes192(aes) => aes.encrypt_block(block),
            Ciph::Aes256(aes) => aes.encrypt_block(block),
        }
    }
}
