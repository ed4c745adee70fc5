//! The 6k±1 wheel.
//!
//! Every prime above 3 is `6k - 1` or `6k + 1`, so walking 5, 7, 11, 13, 17, 19, ...
//! (alternating steps of 2 and 4) skips all multiples of 2 and 3.

/// First candidate on the wheel.
pub const WHEEL_START: u32 = 5;

/// Wheel candidates in `[5, end)`, ascending.
///
/// The cursor is kept in `u64` so stepping past the last candidate below
/// `u32::MAX` cannot wrap.
#[derive(Debug, Clone)]
pub struct Wheel {
    next: u64,
    step: u64,
    end: u64,
}

impl Wheel {
    pub fn below(end: u32) -> Self {
        Self {
            next: WHEEL_START as u64,
            step: 2,
            end: end as u64,
        }
    }
}

impl Iterator for Wheel {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        if self.next >= self.end {
            return None;
        }
        let i = self.next;
        self.next += self.step;
        self.step = 6 - self.step; // 2 -> 4 -> 2 ...
        Some(i as u32)
    }
}

/// Integer square root, exact for all u64 values.
/// Float seed, then corrected with checked arithmetic.
#[inline]
pub fn isqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut x = (n as f64).sqrt() as u64;
    while x > 0 && x.checked_mul(x).map_or(true, |sq| sq > n) {
        x -= 1;
    }
    while (x + 1).checked_mul(x + 1).map_or(false, |sq| sq <= n) {
        x += 1;
    }
    x
}
