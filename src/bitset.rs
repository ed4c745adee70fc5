//! Byte-packed composite map over `[0, len)`.
//!
//! A set bit means "not prime". Bits start clear, so every index is presumed
//! prime until the sieve strikes it.

use crate::error::{try_alloc, Buffer, Result};

pub struct CompositeBits {
    bytes: Vec<u8>,
    len: u32,
}

impl CompositeBits {
    /// Allocates `ceil(len / 8)` zeroed bytes.
    pub fn new(len: u32) -> Result<Self> {
        let bytes = try_alloc((len as usize).div_ceil(8), Some(0), Buffer::Sieve)?;
        Ok(Self { bytes, len })
    }

    /// Allocates a sieve map with 0 and 1 already marked.
    pub fn for_sieve(len: u32) -> Result<Self> {
        let mut bits = Self::new(len)?;
        for i in 0..len.min(2) {
            bits.set(i);
        }
        Ok(bits)
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn set(&mut self, i: u32) {
        debug_assert!(i < self.len);
        self.bytes[(i >> 3) as usize] |= 1 << (i & 7);
    }

    #[inline]
    pub fn clear(&mut self, i: u32) {
        debug_assert!(i < self.len);
        self.bytes[(i >> 3) as usize] &= !(1 << (i & 7));
    }

    #[inline]
    pub fn test(&self, i: u32) -> bool {
        debug_assert!(i < self.len);
        (self.bytes[(i >> 3) as usize] >> (i & 7)) & 1 == 1
    }

    #[inline]
    pub fn is_prime(&self, i: u32) -> bool {
        !self.test(i)
    }

    /// Marks `start, start + step, ...` below `len`.
    ///
    /// Walks in `u64` so the last stride past `u32::MAX` cannot wrap.
    pub fn strike(&mut self, start: u64, step: u64) {
        let end = self.len as u64;
        let mut j = start;
        while j < end {
            self.set(j as u32);
            j += step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clear_test() {
        let mut b = CompositeBits::new(20).unwrap();
        assert_eq!(b.byte_len(), 3);
        assert!((0..20).all(|i| !b.test(i)));

        b.set(0);
        b.set(9);
        b.set(19);
        assert!(b.test(0) && b.test(9) && b.test(19));
        assert!(!b.test(8) && !b.test(10));

        b.clear(9);
        assert!(!b.test(9));
        assert!(b.is_prime(9));
        assert!(!b.is_prime(19));
    }

    #[test]
    fn test_sieve_excludes_zero_and_one() {
        let b = CompositeBits::for_sieve(10).unwrap();
        assert!(b.test(0));
        assert!(b.test(1));
        assert!((2..10).all(|i| b.is_prime(i)));
    }

    #[test]
    fn test_sieve_tiny_bounds() {
        assert!(CompositeBits::for_sieve(0).unwrap().is_empty());
        assert_eq!(CompositeBits::for_sieve(0).unwrap().byte_len(), 0);

        let one = CompositeBits::for_sieve(1).unwrap();
        assert_eq!(one.len(), 1);
        assert!(one.test(0));
    }

    #[test]
    fn test_strike_stops_at_bound() {
        let mut b = CompositeBits::new(30).unwrap();
        b.strike(9, 3);
        let struck: Vec<u32> = (0..30).filter(|&i| b.test(i)).collect();
        assert_eq!(struck, vec![9, 12, 15, 18, 21, 24, 27]);
    }
}
