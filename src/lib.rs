//! Prime table generation for prime-chain search.
//!
//! [`generate_prime_table`] returns every prime below a bound as a compact,
//! ascending `u32` table. The sieve behind it is byte-packed and walks only
//! the 6k±1 wheel past the seed primes 2 and 3.
//!
//! ```
//! let table = prime_table::generate_prime_table(30).unwrap();
//! assert_eq!(table.as_slice(), &[2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
//! assert_eq!(table.len(), 10);
//! ```

pub mod bitset;
pub mod error;
pub mod table;
pub mod verify;
pub mod wheel;

pub use bitset::CompositeBits;
pub use error::{Buffer, Result, TableError};
pub use table::{generate_prime_table, PrimeTable, SEED_PRIMES};
pub use verify::{
    generate_checked, generate_prime_table_with, DefaultVerifier, NoOp, TableCheck, Verifier,
};
pub use wheel::{isqrt, Wheel, WHEEL_START};
