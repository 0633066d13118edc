//! Token fragment derivation.
//!
//! Devices that require a token expect a short fragment of it inside every
//! authenticated command. The fragment is recovered from the Base64 token by
//! decrypting it with the vendor's fixed AES-256 key in ECB mode and removing
//! the PKCS#7 padding.

use aes::cipher::{generic_array::GenericArray, BlockDecrypt, KeyInit};
use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::core::{Error, Result, TOKEN_KEY};

const AES_BLOCK_SIZE: usize = 16;

fn token_error() -> Error {
    Error::token_format("convert token to packet was not successful")
}

/// Derives the packet fragment for a Base64 token, hex encoded
pub fn token_to_packet_fragment(token: &str) -> Result<String> {
    let mut data = STANDARD.decode(token).map_err(|_| token_error())?;
    if data.is_empty() || data.len() % AES_BLOCK_SIZE != 0 {
        return Err(token_error());
    }

    let cipher = Aes256::new(GenericArray::from_slice(TOKEN_KEY));
    for block in data.chunks_exact_mut(AES_BLOCK_SIZE) {
        cipher.decrypt_block(GenericArray::from_mut_slice(block));
    }

    let fragment = strip_pkcs7(&data).ok_or_else(token_error)?;
    Ok(hex::encode(fragment))
}

fn strip_pkcs7(data: &[u8]) -> Option<&[u8]> {
    let pad = *data.last()? as usize;
    if pad == 0 || pad > AES_BLOCK_SIZE || pad > data.len() {
        return None;
    }
    let (body, padding) = data.split_at(data.len() - pad);
    padding.iter().all(|&b| b as usize == pad).then_some(body)
}
