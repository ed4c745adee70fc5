//! Prime table generation: a bit-packed Sieve of Eratosthenes over the 6k±1 wheel.
//!
//! Strategy:
//!   1. Strike multiples of the seed primes 2 and 3 directly
//!   2. Walk the wheel up to √n, striking from p² for every survivor
//!   3. Count survivors on the wheel, then size the table exactly
//!   4. Re-walk the same wheel to fill the table and drop the sieve

use std::ops::Deref;
use std::slice;

use log::{debug, warn};

use crate::bitset::CompositeBits;
use crate::error::{try_alloc, Buffer, Result};
use crate::wheel::{isqrt, Wheel};

/// Primes sieved directly, before the wheel takes over.
pub const SEED_PRIMES: [u32; 2] = [2, 3];

/// Every prime strictly below `sieve_size`, ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeTable {
    primes: Vec<u32>,
    sieve_size: u32,
}

impl PrimeTable {
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.primes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.primes.len()
    }

    /// Number of primes as `u32`. Fits for any `u32` bound.
    #[inline]
    pub fn count(&self) -> u32 {
        self.primes.len() as u32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    /// The exclusive bound this table was built for.
    #[inline]
    pub fn sieve_size(&self) -> u32 {
        self.sieve_size
    }

    pub fn largest(&self) -> Option<u32> {
        self.primes.last().copied()
    }

    pub fn contains(&self, n: u32) -> bool {
        self.primes.binary_search(&n).is_ok()
    }

    pub fn iter(&self) -> slice::Iter<'_, u32> {
        self.primes.iter()
    }

    /// Inverse of 2 modulo each prime, index-aligned with the table.
    /// 2 has no inverse mod 2, so its slot is 0.
    pub fn two_inverses(&self) -> Vec<u32> {
        self.primes
            .iter()
            .map(|&p| if p == 2 { 0 } else { p / 2 + 1 })
            .collect()
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.primes
    }

    #[cfg(test)]
    pub(crate) fn primes_mut(&mut self) -> &mut Vec<u32> {
        &mut self.primes
    }
}

impl Deref for PrimeTable {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.primes
    }
}

impl<'a> IntoIterator for &'a PrimeTable {
    type Item = &'a u32;
    type IntoIter = slice::Iter<'a, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.primes.iter()
    }
}

/// Builds the table of all primes `< sieve_size`.
///
/// Bounds of 2 or less give an empty table; 3 gives `[2]`; 4 and 5 give `[2, 3]`.
pub fn generate_prime_table(sieve_size: u32) -> Result<PrimeTable> {
    let table = sieve(sieve_size)
        .and_then(extract)
        .inspect_err(|e| warn!("prime table generation aborted: {}", e))?;
    debug!(
        "generated {} primes below {} (largest {:?})",
        table.len(),
        sieve_size,
        table.largest()
    );
    Ok(table)
}

/// Marks every composite below `sieve_size`.
fn sieve(sieve_size: u32) -> Result<CompositeBits> {
    let mut bits = CompositeBits::for_sieve(sieve_size)?;

    for p in SEED_PRIMES {
        let p = p as u64;
        bits.strike(p * p, p);
    }

    // largest i with i² < sieve_size; at most 65_535
    let limit = isqrt((sieve_size as u64).saturating_sub(1)) as u32;
    for i in Wheel::below(limit + 1) {
        if bits.is_prime(i) {
            let i = i as u64;
            bits.strike(i * i, i);
        }
    }

    debug!("sieved {} numbers into {} bytes", sieve_size, bits.byte_len());
    Ok(bits)
}

fn seeds_below(sieve_size: u32) -> impl Iterator<Item = u32> {
    SEED_PRIMES.into_iter().filter(move |&p| p < sieve_size)
}

/// Wheel candidates left unmarked. Counting and extraction both walk this,
/// so the table is always sized exactly.
fn survivors(bits: &CompositeBits) -> impl Iterator<Item = u32> + '_ {
    Wheel::below(bits.len()).filter(move |&i| bits.is_prime(i))
}

fn count_survivors(bits: &CompositeBits) -> usize {
    seeds_below(bits.len()).count() + survivors(bits).count()
}

/// Collects the primes and consumes the sieve.
fn extract(bits: CompositeBits) -> Result<PrimeTable> {
    let count = count_survivors(&bits);

    let mut primes = try_alloc(count, None, Buffer::Table)?;

    primes.extend(seeds_below(bits.len()));
    primes.extend(survivors(&bits));
    debug_assert_eq!(primes.len(), count);

    Ok(PrimeTable {
        primes,
        sieve_size: bits.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primes_below(n: u32) -> Vec<u32> {
        generate_prime_table(n).unwrap().into_vec()
    }

    /// Flat reference sieve.
    fn reference(n: u32) -> Vec<u32> {
        if n < 3 {
            return vec![];
        }
        let sieve = primal::Sieve::new(n as usize);
        sieve
            .primes_from(0)
            .take_while(|&p| p < n as usize)
            .map(|p| p as u32)
            .collect()
    }

    #[test]
    fn test_small_primes() {
        assert_eq!(primes_below(10), vec![2, 3, 5, 7]);
        assert_eq!(primes_below(30), vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn test_count_matches_len() {
        for n in [0, 1, 2, 3, 4, 5, 10, 30, 121, 122, 1_000, 65_536] {
            let counted = count_survivors(&sieve(n).unwrap());
            let table = generate_prime_table(n).unwrap();
            assert_eq!(counted, table.len(), "n={}", n);
            assert_eq!(table.count() as usize, table.len(), "n={}", n);
        }
        assert_eq!(generate_prime_table(10).unwrap().count(), 4);
        assert_eq!(generate_prime_table(30).unwrap().count(), 10);
    }

    #[test]
    fn test_known_counts() {
        assert_eq!(primes_below(100).len(), 25);
        assert_eq!(primes_below(1_000).len(), 168);
        assert_eq!(primes_below(10_000).len(), 1_229);
        assert_eq!(primes_below(100_000).len(), 9_592);
        assert_eq!(primes_below(500_000).len(), 41_538);
    }

    #[test]
    fn test_edge_cases() {
        assert_eq!(primes_below(0), vec![]);
        assert_eq!(primes_below(1), vec![]);
        assert_eq!(primes_below(2), vec![]);
        assert_eq!(primes_below(3), vec![2]);
        assert_eq!(primes_below(4), vec![2, 3]);
        assert_eq!(primes_below(5), vec![2, 3]);
        assert_eq!(primes_below(6), vec![2, 3, 5]);
        assert_eq!(primes_below(8), vec![2, 3, 5, 7]);
    }

    #[test]
    fn test_bound_is_exclusive() {
        assert_eq!(*primes_below(29).last().unwrap(), 23);
        assert_eq!(*primes_below(30).last().unwrap(), 29);
        assert_eq!(generate_prime_table(500_000).unwrap().largest(), Some(499_979));
    }

    #[test]
    fn test_prime_squares_struck() {
        // squares of wheel primes sitting right at the sieve limit
        for (n, sq) in [(26, 25), (50, 49), (122, 121), (170, 169), (290, 289)] {
            let table = generate_prime_table(n).unwrap();
            assert!(!table.contains(sq), "{} reported prime below {}", sq, n);
        }
    }

    #[test]
    fn test_matches_flat_sieve() {
        for n in [10, 100, 1_000, 10_000, 100_000, 500_000] {
            assert_eq!(primes_below(n), reference(n), "Mismatch at n={}", n);
        }
        for n in 0..200 {
            assert_eq!(primes_below(n), reference(n), "Mismatch at n={}", n);
        }
    }

    #[test]
    fn test_wheel_soundness() {
        let table = generate_prime_table(100_000).unwrap();
        assert!(table.iter().filter(|&&p| p > 3).all(|&p| p % 6 == 1 || p % 6 == 5));
        assert!(table.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(generate_prime_table(12_345).unwrap(), generate_prime_table(12_345).unwrap());
    }

    #[test]
    fn test_table_accessors() {
        let table = generate_prime_table(30).unwrap();
        assert_eq!(table.sieve_size(), 30);
        assert!(table.contains(29));
        assert!(!table.contains(27));
        assert!(!table.contains(31));
        assert_eq!(table[4], 11);
        assert_eq!((&table).into_iter().sum::<u32>(), 129);

        let empty = generate_prime_table(2).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.largest(), None);
    }

    #[test]
    fn test_two_inverses() {
        let table = generate_prime_table(1_000).unwrap();
        let inv = table.two_inverses();
        assert_eq!(inv.len(), table.len());
        assert_eq!(&inv[..4], &[0, 2, 3, 4]);
        for (&p, &x) in table.iter().zip(&inv).skip(1) {
            assert_eq!((2 * x as u64) % p as u64, 1, "p={}", p);
        }
    }

    #[test]
    fn test_sieve_marks_only_composites() {
        let bits = sieve(100).unwrap();
        let expected = reference(100);
        for i in 0..100 {
            assert_eq!(bits.is_prime(i), expected.contains(&i), "i={}", i);
        }
        assert_eq!(count_survivors(&bits), 25);
    }
}
