use std::fmt;
use std::mem::size_of;

use thiserror::Error;

/// Which buffer a failed allocation was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buffer {
    Sieve,
    Table,
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Buffer::Sieve => f.write_str("sieve bit array"),
            Buffer::Table => f.write_str("prime table"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("failed to allocate {bytes} bytes for the {buffer}")]
    Allocation { buffer: Buffer, bytes: usize },

    #[error("prime table below {sieve_size} failed verification")]
    Verification { sieve_size: u32 },
}

pub type Result<T> = std::result::Result<T, TableError>;

/// Reserves exactly `len` slots for `buffer`, filled with `fill` when given.
pub(crate) fn try_alloc<T: Clone>(len: usize, fill: Option<T>, buffer: Buffer) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| TableError::Allocation {
        buffer,
        bytes: len.saturating_mul(size_of::<T>()),
    })?;
    if let Some(fill) = fill {
        v.resize(len, fill);
    }
    Ok(v)
}
