/*!
Hash primitives: a record hash and a commutative combiner.

Two orthogonal knobs govern hashing throughout the library:

- **Width** — colors are 32 or 64 bit words, abstracted by [HashWord] and
  fixed per analysis by the `hash_width` option.
- **Ring** — combining is either end-around-carry addition on the full
  word, or addition modulo the greatest prime below the word
  (`2³² − 5`, `2⁶⁴ − 59`), per the `use_prime_ring` option.

The record hash is XXH3 over the little-endian byte image of the record,
truncated to the word.
In prime-ring mode the hash is rejection-sampled over seeded XXH3 until it
lies in the ring, so every combined value is already reduced.

[combine] is commutative and associative, has `0` as identity, and yields
`0` only when combining `0` with `0` — which is what lets clause and
variable summaries be folded in any order without a zero sink.
The end-around carry is the reason: plain wrapping addition cancels
`a + (2ᴴ − a)`, while carrying the overflow bit back in makes the sum
arithmetic modulo `2ᴴ − 1` on nonzero values.
*/

pub mod wl;

use xxhash_rust::xxh3::{xxh3_64, xxh3_64_with_seed};

/// A word serving as a color or summary hash.
pub trait HashWord:
    Copy + Eq + Ord + std::hash::Hash + Default + std::fmt::Debug + std::fmt::Display
{
    /// The greatest value of the word.
    const MAX: Self;

    /// The greatest prime below `2^BITS`.
    const RING: Self;

    /// The word obtained by truncating a 64-bit hash.
    fn truncate(word: u64) -> Self;

    /// The byte image of the word, little-endian, appended to the buffer.
    fn write_bytes(self, buffer: &mut Vec<u8>);

    /// Addition with the overflow bit carried back in.
    fn carry_add(self, other: Self) -> Self;

    /// Addition modulo [RING](HashWord::RING).
    ///
    /// # Premise
    /// Both operands are reduced.
    fn ring_add(self, other: Self) -> Self;

    /// The word reduced modulo [RING](HashWord::RING).
    fn reduce(self) -> Self;
}

macro_rules! hash_word_impl {
    ($word:ty, $ring:expr) => {
        impl HashWord for $word {
            const MAX: Self = <$word>::MAX;
            const RING: Self = $ring;

            fn truncate(word: u64) -> Self {
                word as $word
            }

            fn write_bytes(self, buffer: &mut Vec<u8>) {
                buffer.extend_from_slice(&self.to_le_bytes());
            }

            fn carry_add(self, other: Self) -> Self {
                let (sum, overflow) = self.overflowing_add(other);
                match overflow {
                    true => sum + 1,
                    false => sum,
                }
            }

            fn ring_add(self, other: Self) -> Self {
                let gap = Self::RING - other;
                match self >= gap {
                    true => self - gap,
                    false => self + other,
                }
            }

            fn reduce(self) -> Self {
                self % Self::RING
            }
        }
    };
}

hash_word_impl!(u32, u32::MAX - 4);
hash_word_impl!(u64, u64::MAX - 58);

/// Combines a hash into an accumulator, commutatively.
pub fn combine<H: HashWord>(accumulator: H, hash: H, prime_ring: bool) -> H {
    match prime_ring {
        true => accumulator.ring_add(hash),
        false => accumulator.carry_add(hash),
    }
}

/// The hash of a flat record given by its byte image.
///
/// In prime-ring mode the hash is sampled until it lies in the ring.
pub fn hash_bytes<H: HashWord>(bytes: &[u8], prime_ring: bool) -> H {
    if !prime_ring {
        return H::truncate(xxh3_64(bytes));
    }

    let mut seed: u64 = 0;
    loop {
        let hash = H::truncate(xxh3_64_with_seed(bytes, seed));
        if hash < H::RING {
            return hash;
        }
        seed += 1;
    }
}

/// The hash of a single word.
pub fn hash_word<H: HashWord>(word: H, prime_ring: bool) -> H {
    let mut buffer = Vec::with_capacity(8);
    word.write_bytes(&mut buffer);
    hash_bytes(&buffer, prime_ring)
}

/// The hash of an ordered pair of words.
pub fn hash_pair<H: HashWord>(first: H, second: H, prime_ring: bool) -> H {
    let mut buffer = Vec::with_capacity(16);
    first.write_bytes(&mut buffer);
    second.write_bytes(&mut buffer);
    hash_bytes(&buffer, prime_ring)
}
