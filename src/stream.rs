// One-shot keystream generation from a key and sequence number.

#[cfg(feature = "alloc")] use alloc::vec::Vec;

use super::*;

/// How the bytes of a final, partially used word are chosen
/// when the requested length is not a multiple of 8.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum TailMode {
    /// Take the most significant bytes of the word. The output for any length
    /// is then a prefix of the output for every longer length.
    #[default]
    Truncate,
    /// Tail byte `i` is `(word >> (7 - i)) & 0xff`, as produced by the C
    /// reference harness. This is not a byte slice of the word, so the tail
    /// does not agree with the corresponding bytes of a longer stream.
    Reference,
}

impl TailMode {
    /// Writes up to 8 tail bytes taken from `word` into `dest`.
    #[inline]
    pub fn write(self, word: u64, dest: &mut [u8]) {
        debug_assert!(dest.len() <= 8);
        match self {
            TailMode::Truncate => {
                let n = dest.len();
                dest.copy_from_slice(&word_to_bytes(word)[.. n]);
            }
            TailMode::Reference => {
                for (i, byte) in dest.iter_mut().enumerate() {
                    *byte = (word >> (7 - i)) as u8;
                }
            }
        }
    }
}

/// Writes `length` keystream bytes for `key` and `sequence` into the start of `out`.
///
/// Only the first 8 bytes of `key` and `sequence` are read; each is a big-endian word.
/// Bytes of `out` past `length` are left untouched.
pub fn generate_into(key: &[u8], sequence: &[u8], out: &mut [u8], length: usize, tail: TailMode) -> Result<(), Error> {
    let key = read_word(key)?;
    let sequence = read_word(sequence)?;
    if out.len() < length {
        return Err(Error::InsufficientBuffer { required: length, available: out.len() });
    }
    log::trace!("generating {} keystream bytes, {} in the tail, {:?}", length, length % 8, tail);
    if length == 0 {
        return Ok(());
    }
    Trivium64::from_words(key, sequence).fill_bytes_with(&mut out[.. length], tail);
    Ok(())
}

/// Returns `length` keystream bytes for `key` and `sequence`, cutting any
/// partial tail word with `TailMode::Truncate`.
#[cfg(feature = "alloc")]
pub fn generate(key: &[u8], sequence: &[u8], length: usize) -> Result<Vec<u8>, Error> {
    generate_with(key, sequence, length, TailMode::Truncate)
}

/// Returns `length` keystream bytes for `key` and `sequence`.
#[cfg(feature = "alloc")]
pub fn generate_with(key: &[u8], sequence: &[u8], length: usize, tail: TailMode) -> Result<Vec<u8>, Error> {
    let mut out = alloc::vec![0u8; length];
    generate_into(key, sequence, &mut out, length, tail)?;
    Ok(out)
}
