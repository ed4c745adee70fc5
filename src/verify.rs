//! Pluggable table verification.
//!
//! Production builds use [`NoOp`], which compiles away. Building with the
//! `verify` feature makes [`DefaultVerifier`] a full [`TableCheck`]; any other
//! verifier can be injected through [`generate_prime_table_with`].

use log::{debug, warn};

use crate::error::{Result, TableError};
use crate::table::{generate_prime_table, PrimeTable};

pub trait Verifier {
    /// Returns `false` if `table` is not the exact prime table for its bound.
    fn check_table(&self, table: &PrimeTable) -> bool;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoOp;

impl Verifier for NoOp {
    #[inline(always)]
    fn check_table(&self, _table: &PrimeTable) -> bool {
        true
    }
}

/// Slow, independent check of a generated table.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableCheck;

impl Verifier for TableCheck {
    fn check_table(&self, table: &PrimeTable) -> bool {
        let bound = table.sieve_size();
        let primes = table.as_slice();

        if let Some(w) = primes.windows(2).find(|w| w[0] >= w[1]) {
            warn!("table not strictly ascending at {} -> {}", w[0], w[1]);
            return false;
        }
        if let Some(&p) = primes.last().filter(|&&p| p >= bound) {
            warn!("table entry {} not below bound {}", p, bound);
            return false;
        }

        for (idx, &p) in primes.iter().enumerate() {
            if p > 3 && p % 6 != 1 && p % 6 != 5 {
                warn!("table entry {} is off the 6k±1 wheel", p);
                return false;
            }
            if !is_prime_by_division(p, &primes[..idx]) {
                warn!("table entry {} is not prime", p);
                return false;
            }
        }

        let expected = reference_count(bound);
        if primes.len() != expected {
            warn!(
                "table below {} holds {} primes, expected {}",
                bound,
                primes.len(),
                expected
            );
            return false;
        }

        debug!("verified {} primes below {}", primes.len(), bound);
        true
    }
}

/// Trial division by the (ascending) primes before `p`.
fn is_prime_by_division(p: u32, smaller: &[u32]) -> bool {
    if p < 2 {
        return false;
    }
    let p = p as u64;
    smaller
        .iter()
        .map(|&q| q as u64)
        .take_while(|&q| q * q <= p)
        .all(|q| p % q != 0)
}

/// π(bound - 1) from an independent sieve.
fn reference_count(bound: u32) -> usize {
    if bound <= 2 {
        return 0;
    }
    let top = (bound - 1) as usize;
    primal::Sieve::new(top).prime_pi(top)
}

#[cfg(feature = "verify")]
pub type DefaultVerifier = TableCheck;

#[cfg(not(feature = "verify"))]
pub type DefaultVerifier = NoOp;

/// Generates the table and runs `verifier` over it.
pub fn generate_prime_table_with<V: Verifier + ?Sized>(
    sieve_size: u32,
    verifier: &V,
) -> Result<PrimeTable> {
    let table = generate_prime_table(sieve_size)?;
    if !verifier.check_table(&table) {
        return Err(TableError::Verification { sieve_size });
    }
    Ok(table)
}

/// Generates the table with the build's [`DefaultVerifier`].
pub fn generate_checked(sieve_size: u32) -> Result<PrimeTable> {
    generate_prime_table_with(sieve_size, &DefaultVerifier::default())
}
