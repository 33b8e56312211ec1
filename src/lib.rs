//! Trivium64: a word-parallel Trivium keystream generator.
//!
//! The generator takes a 64-bit key and a 64-bit sequence number (distinct
//! sequence numbers give independent streams under the same key) and produces
//! 64 keystream bits per step. The output is bit-for-bit identical to the
//! bit-serial Trivium of De Cannière and Preneel with the key in `K1..K64`,
//! the sequence number in `IV1..IV64` and the remaining key/IV bits cleared,
//! read MSB-first into 64-bit words.
//!
//! ```
//! use trivium64::Trivium64;
//!
//! let mut rng = Trivium64::from_words(0x1112131415161718, 0xAAABACADADAFFFCC);
//! assert_eq!(rng.next_word(), 0x592885C3C6D2E9C9);
//! ```
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod codec;
pub mod error;
pub mod stream;
pub mod trivium;

pub use codec::*;
pub use error::Error;
pub use stream::*;
pub use trivium::*;
pub use rand_core::{self, CryptoRng, RngCore, SeedableRng};

// Canonical Trivium register lengths.
pub const A_LEN: u32 = 93;
pub const B_LEN: u32 = 84;
pub const C_LEN: u32 = 111;

// Tap positions, 1-based and local to each register. Positions in the
// 288-bit serial state are A: n, B: 93 + n, C: 177 + n.

// Register A (s1..s93).
pub const TAP_A_NEAR: u32 = 66;
pub const TAP_A_FAR: u32 = A_LEN;
pub const TAP_A_AND_LO: u32 = A_LEN - 2;
pub const TAP_A_AND_HI: u32 = A_LEN - 1;
/// Feeds register C's branch.
pub const TAP_A_CROSS: u32 = 69;

// Register B (s94..s177).
pub const TAP_B_NEAR: u32 = 69;
pub const TAP_B_FAR: u32 = B_LEN;
pub const TAP_B_AND_LO: u32 = B_LEN - 2;
pub const TAP_B_AND_HI: u32 = B_LEN - 1;
/// Feeds register A's branch.
pub const TAP_B_CROSS: u32 = 78;

// Register C (s178..s288).
pub const TAP_C_NEAR: u32 = 66;
pub const TAP_C_FAR: u32 = C_LEN;
pub const TAP_C_AND_LO: u32 = C_LEN - 2;
pub const TAP_C_AND_HI: u32 = C_LEN - 1;
/// Feeds register B's branch.
pub const TAP_C_CROSS: u32 = 87;

/// Older word of register C at seeding: positions 109..111 set, the fixed
/// "111" suffix of the Trivium initial state.
pub const C_SUFFIX: u64 = 0x0000_7000_0000_0000;

/// Number of 64-bit steps discarded after seeding: 4 * 288 = 1152 serial rounds.
pub const WARMUP_STEPS: usize = 4 * (A_LEN + B_LEN + C_LEN) as usize / 64;
