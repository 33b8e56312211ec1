// Conversions between byte buffers and 64-bit words.
// Words are always big-endian: the first byte is the most significant.

use super::Error;

/// Interprets 8 bytes as a big-endian 64-bit word.
#[inline]
pub const fn bytes_to_word(bytes: [u8; 8]) -> u64 {
    u64::from_be_bytes(bytes)
}

/// Returns the big-endian bytes of a 64-bit word.
#[inline]
pub const fn word_to_bytes(word: u64) -> [u8; 8] {
    word.to_be_bytes()
}

/// Reads a big-endian word from the first 8 bytes of `bytes`.
/// Any further bytes are ignored.
pub fn read_word(bytes: &[u8]) -> Result<u64, Error> {
    match bytes.get(.. 8) {
        Some(head) => {
            let mut word = [0u8; 8];
            word.copy_from_slice(head);
            Ok(bytes_to_word(word))
        }
        None => Err(Error::InvalidInputLength { expected: 8, actual: bytes.len() }),
    }
}
