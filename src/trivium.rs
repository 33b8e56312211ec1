use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use super::*;

// Trivium64 features
// -64 serial Trivium rounds per step, computed with word operations only
// -64-bit key and 64-bit sequence number, 384-bit register footprint
// -output identical to bit-serial Trivium packed MSB-first into 64-bit words
// -2**64 independent streams per key

/// Trivium64 keystream generator. 64-bit output, 384-bit register footprint.
///
/// Each register is held as its 128 most recent bits: a newer word and an
/// older word. Bit `k` of the newer word is register position `64 - k`
/// and bit `k` of the older word is position `65 + k`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Eq, PartialEq)]
pub struct Trivium64 {
    /// Register A, positions 1..64.
    a_new: u64,
    /// Register A, positions 65..128.
    a_old: u64,
    /// Register B, positions 1..64.
    b_new: u64,
    /// Register B, positions 65..128.
    b_old: u64,
    /// Register C, positions 1..64.
    c_new: u64,
    /// Register C, positions 65..128.
    c_old: u64,
    /// Number of output words produced since warm-up.
    position: u64,
}

// Registers hold key-derived material, so Debug only shows the position.
impl core::fmt::Debug for Trivium64 {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Trivium64 {{ position: {} }}", self.position)
    }
}

/// Returns the values of register position `n` for the next 64 serial rounds,
/// first round in the most significant bit. Requires 64 < n < 128.
#[inline] const fn tap(new: u64, old: u64, n: u32) -> u64 {
    (old << (128 - n)) ^ (new >> (n - 64))
}

impl Trivium64 {

    /// Creates a generator from big-endian key and sequence number bytes.
    pub fn new(key: [u8; 8], sequence: [u8; 8]) -> Self {
        Self::from_words(bytes_to_word(key), bytes_to_word(sequence))
    }

    /// Creates a generator from key and sequence number buffers.
    /// Only the first 8 bytes of each are read.
    pub fn from_slices(key: &[u8], sequence: &[u8]) -> Result<Self, Error> {
        Ok(Self::from_words(read_word(key)?, read_word(sequence)?))
    }

    /// Creates a generator from a 64-bit key and a 64-bit sequence number.
    /// The warm-up rounds have been run when this returns.
    pub fn from_words(key: u64, sequence: u64) -> Self {
        let mut trivium = Trivium64 {
            a_new: key,
            a_old: 0,
            b_new: sequence,
            b_old: 0,
            c_new: 0,
            c_old: C_SUFFIX,
            position: 0,
        };
        for _ in 0 .. WARMUP_STEPS {
            trivium.step();
        }
        log::trace!("Trivium64 seeded, {} warm-up steps discarded", WARMUP_STEPS);
        trivium
    }

    /// Runs 64 serial rounds at once and returns their output bits,
    /// first round in the most significant bit. Does not advance the position.
    #[inline]
    pub fn step(&mut self) -> u64 {
        let (a_new, a_old) = (self.a_new, self.a_old);
        let (b_new, b_old) = (self.b_new, self.b_old);
        let (c_new, c_old) = (self.c_new, self.c_old);

        let mut t1 = tap(a_new, a_old, TAP_A_NEAR) ^ tap(a_new, a_old, TAP_A_FAR);
        let mut t2 = tap(b_new, b_old, TAP_B_NEAR) ^ tap(b_new, b_old, TAP_B_FAR);
        let mut t3 = tap(c_new, c_old, TAP_C_NEAR) ^ tap(c_new, c_old, TAP_C_FAR);
        let z = t1 ^ t2 ^ t3;

        t1 ^= (tap(a_new, a_old, TAP_A_AND_LO) & tap(a_new, a_old, TAP_A_AND_HI)) ^ tap(b_new, b_old, TAP_B_CROSS);
        t2 ^= (tap(b_new, b_old, TAP_B_AND_LO) & tap(b_new, b_old, TAP_B_AND_HI)) ^ tap(c_new, c_old, TAP_C_CROSS);
        t3 ^= (tap(c_new, c_old, TAP_C_AND_LO) & tap(c_new, c_old, TAP_C_AND_HI)) ^ tap(a_new, a_old, TAP_A_CROSS);

        // A is fed from C's branch, B from A's and C from B's.
        self.a_old = a_new;
        self.a_new = t3;
        self.b_old = b_new;
        self.b_new = t1;
        self.c_old = c_new;
        self.c_new = t2;
        z
    }

    /// Generates the next 64-bit keystream word.
    #[wrappit] #[inline]
    pub fn next_word(&mut self) -> u64 {
        self.position = self.position + 1;
        self.step()
    }

    /// Discards the next `words` keystream words.
    #[wrappit]
    pub fn skip(&mut self, words: u64) {
        for _ in 0 .. words {
            self.step();
        }
        self.position = self.position + words;
    }

    /// Returns the number of keystream words produced since seeding.
    /// Wraps around after 2**64 words.
    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Returns the register words in the order
    /// A newer, A older, B newer, B older, C newer, C older.
    pub fn registers(&self) -> [u64; 6] {
        [self.a_new, self.a_old, self.b_new, self.b_old, self.c_new, self.c_old]
    }

    /// Fills `dest` with keystream bytes, 8 bytes per word, big-endian.
    /// A partial tail consumes a whole word and is cut according to `tail`.
    pub fn fill_bytes_with(&mut self, dest: &mut [u8], tail: TailMode) {
        let mut chunks = dest.chunks_exact_mut(8);
        for chunk in &mut chunks {
            chunk.copy_from_slice(&word_to_bytes(self.next_word()));
        }
        let rest = chunks.into_remainder();
        if !rest.is_empty() {
            let word = self.next_word();
            tail.write(word, rest);
        }
    }

    /// XORs keystream into `data`. Applying it twice with the same
    /// key and sequence number restores the input.
    pub fn apply_keystream(&mut self, data: &mut [u8]) {
        let mut chunks = data.chunks_exact_mut(8);
        for chunk in &mut chunks {
            let key = word_to_bytes(self.next_word());
            chunk.iter_mut().zip(key.iter()).for_each(|(x, k)| *x ^= k);
        }
        let rest = chunks.into_remainder();
        if !rest.is_empty() {
            let key = word_to_bytes(self.next_word());
            rest.iter_mut().zip(key.iter()).for_each(|(x, k)| *x ^= k);
        }
    }
}

impl RngCore for Trivium64 {
    fn next_u32(&mut self) -> u32 {
        (self.next_word() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_word()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.fill_bytes_with(dest, TailMode::Truncate)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for Trivium64 {}

impl SeedableRng for Trivium64 {
    type Seed = [u8; 16];

    /// Creates a generator from key bytes followed by sequence number bytes,
    /// both big-endian.
    fn from_seed(seed: Self::Seed) -> Self {
        let mut key = [0u8; 8];
        let mut sequence = [0u8; 8];
        key.copy_from_slice(&seed[.. 8]);
        sequence.copy_from_slice(&seed[8 ..]);
        Trivium64::new(key, sequence)
    }
}

#[cfg(test)] mod tests {
    use super::*;

    /// Bit-serial Trivium, one byte per state bit, s[1..=288].
    struct Serial {
        s: [u8; 289],
    }

    impl Serial {
        fn new(key: u64, sequence: u64) -> Self {
            let mut s = [0u8; 289];
            for i in 0 .. 64 {
                s[1 + i] = ((key >> i) & 1) as u8;
                s[94 + i] = ((sequence >> i) & 1) as u8;
            }
            s[286] = 1;
            s[287] = 1;
            s[288] = 1;
            let mut serial = Serial { s };
            for _ in 0 .. 4 * 288 {
                serial.round();
            }
            serial
        }

        fn round(&mut self) -> u8 {
            let s = &mut self.s;
            let mut t1 = s[66] ^ s[93];
            let mut t2 = s[162] ^ s[177];
            let mut t3 = s[243] ^ s[288];
            let z = t1 ^ t2 ^ t3;
            t1 ^= (s[91] & s[92]) ^ s[171];
            t2 ^= (s[175] & s[176]) ^ s[264];
            t3 ^= (s[286] & s[287]) ^ s[69];
            s.copy_within(1 .. 93, 2);
            s[1] = t3;
            s.copy_within(94 .. 177, 95);
            s[94] = t1;
            s.copy_within(178 .. 288, 179);
            s[178] = t2;
            z
        }

        fn word(&mut self) -> u64 {
            let mut w = 0;
            for _ in 0 .. 64 {
                w = (w << 1) | self.round() as u64;
            }
            w
        }
    }

    #[test] pub fn reference_vector() {
        let mut trivium = Trivium64::from_words(0x1112131415161718, 0xAAABACADADAFFFCC);
        assert_eq!(
            [0xF165489CF5F0E7D4, 0x9F046E057AF1EEBE, 0xA8770ED552CE0549, 0xAD22451573B28B5C, 0x16D9BE52B47671BA, 0xD41DDD5F5FBB03F1],
            trivium.registers()
        );
        let expected = [0x592885C3C6D2E9C9, 0xCDE145458E2C9C0C, 0x3051977F5C0C9ABC, 0xC3EA2B8A289A4F21, 0xC9EF3954AD860847];
        for &word in expected.iter() {
            assert_eq!(word, trivium.next_word());
        }
        assert_eq!(5, trivium.position());
    }

    #[test] pub fn estream_zero_vector() {
        // eSTREAM Trivium, key and IV zero: FBE0BF265859051B 517A2E4E239FC97F ...
        // eSTREAM packs bits LSB-first per byte, so every byte appears bit-reversed here.
        let mut trivium = Trivium64::from_words(0, 0);
        for &word in [0xFBE0BF265859051Bu64, 0x517A2E4E239FC97F].iter() {
            let reversed = bytes_to_word(word_to_bytes(word).map(u8::reverse_bits));
            assert_eq!(reversed, trivium.next_word());
        }
        assert_eq!(0xDF07FD641A9AA0D8, Trivium64::from_words(0, 0).next_word());
    }

    #[test] pub fn matches_serial_trivium() {

        let mut r: u64 = 0;
        let mut rnd = || -> u64 { r = r.wrapping_mul(0xd1342543de82ef95).wrapping_add(0xffff); r };

        for _ in 0 .. 8 {
            let key = rnd();
            let sequence = rnd();
            let mut trivium = Trivium64::from_words(key, sequence);
            let mut serial = Serial::new(key, sequence);
            for _ in 0 .. 8 {
                assert_eq!(serial.word(), trivium.next_word());
            }
        }
    }

    #[test] pub fn seeding() {
        assert_eq!(0b111 << (C_LEN - 67), C_SUFFIX);
        assert_eq!(18, WARMUP_STEPS);

        let fresh = Trivium64::from_words(1, 2);
        assert_eq!(0, fresh.position());
        assert_eq!(fresh, Trivium64::new(word_to_bytes(1), word_to_bytes(2)));
        assert_eq!(Ok(fresh.clone()), Trivium64::from_slices(&word_to_bytes(1), &word_to_bytes(2)));
        assert_eq!(
            Err(Error::InvalidInputLength { expected: 8, actual: 4 }),
            Trivium64::from_slices(&[0u8; 4], &[0u8; 8])
        );

        let mut seed = [0u8; 16];
        seed[7] = 1;
        seed[15] = 2;
        assert_eq!(fresh, Trivium64::from_seed(seed));

        // Seeding does not depend on how much output is requested later.
        let mut used = fresh.clone();
        used.next_word();
        assert_eq!(fresh, Trivium64::from_words(1, 2));
        assert_ne!(fresh, used);
    }

    #[test] pub fn run_tests() {

        let mut r: u64 = 0;
        let mut rnd = || -> u64 { r = r.wrapping_mul(0xd1342543de82ef95).wrapping_add(0xffff); r };

        for _ in 0 .. 1<<8 {
            let key = rnd();
            let sequence = rnd();
            let mut trivium1 = Trivium64::from_words(key, sequence);
            let mut trivium2 = trivium1.clone();

            let n = rnd() & 0x3f;
            trivium1.skip(n);
            for _ in 0 .. n { trivium2.next_u64(); }
            assert_eq!(n, trivium1.position());
            assert_eq!(trivium1, trivium2);

            let x = trivium1.clone().next_u64();
            assert_eq!((x >> 32) as u32, trivium2.clone().next_u32());

            let bytes = 1 + (rnd() & 0x7f) as usize;
            let mut buffer1 = [0u8; 0x80];
            let mut buffer2 = [0u8; 0x80];
            trivium1.fill_bytes(&mut buffer1[0 .. bytes]);
            for i in 0 .. 0x10 {
                let x = trivium2.next_u64();
                buffer2[(i << 3) .. ((i + 1) << 3)].copy_from_slice(&x.to_be_bytes());
            }
            assert_eq!(buffer1[0 .. bytes], buffer2[0 .. bytes]);
            assert_eq!(n + ((bytes as u64 + 7) >> 3), trivium1.position());
        }
    }

    #[test] pub fn keystream_xor() {
        let mut data = [0u8; 21];
        data.iter_mut().enumerate().for_each(|(i, x)| *x = i as u8);
        let original = data;

        let mut keystream = [0u8; 21];
        Trivium64::from_words(7, 9).fill_bytes(&mut keystream);

        Trivium64::from_words(7, 9).apply_keystream(&mut data);
        assert!(data.iter().zip(original.iter()).zip(keystream.iter()).all(|((c, p), k)| *c == p ^ k));

        Trivium64::from_words(7, 9).apply_keystream(&mut data);
        assert_eq!(original, data);
    }

    #[test] pub fn streams_differ() {
        let a = Trivium64::from_words(5, 0).next_word();
        let b = Trivium64::from_words(5, 1).next_word();
        let c = Trivium64::from_words(6, 0).next_word();
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[cfg(feature = "serde")]
    #[test] pub fn snapshot() {
        let mut trivium = Trivium64::from_words(3, 4);
        trivium.skip(10);
        let json = serde_json::to_string(&trivium).unwrap();
        let mut restored: Trivium64 = serde_json::from_str(&json).unwrap();
        assert_eq!(10, restored.position());
        assert_eq!(trivium.next_word(), restored.next_word());
    }
}
