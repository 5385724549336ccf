//! Helpers for the code around the deterministic pipeline: fresh seeds from
//! the operating system and a monotonic nonce supplier. Nothing here is
//! consulted implicitly by the derivation functions.
use std::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::FairError;

/// Byte length of seeds produced by the convenience constructors.
pub const DEFAULT_SEED_BYTES: usize = 32;

/// Hex-encoded server seed of `len` bytes from the OS CSPRNG.
pub fn generate_server_seed(len: usize) -> Result<String, FairError> {
    random_hex(len)
}

/// Hex-encoded client seed of `len` bytes from the OS CSPRNG.
pub fn generate_client_seed(len: usize) -> Result<String, FairError> {
    random_hex(len)
}

fn random_hex(len: usize) -> Result<String, FairError> {
    if len == 0 {
        return Err(FairError::InvalidConfig("seed length must be >= 1".into()));
    }
    let mut buf = vec![0u8; len];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| FairError::Entropy(e.to_string()))?;
    Ok(hex::encode(buf))
}

/// Atomically distributed, monotonically increasing round nonces.
#[derive(Debug)]
pub struct NonceSource {
    next: AtomicU64,
}

impl NonceSource {
    /// Create a nonce source starting from `start`.
    pub const fn new(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }

    /// Reserve and return the next nonce.
    ///
    /// `u64::MAX` itself is never issued: once the counter reaches it every
    /// call fails with [`FairError::NonceExhausted`] instead of wrapping.
    #[inline]
    pub fn next(&self) -> Result<u64, FairError> {
        self.next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
            .map_err(|_| FairError::NonceExhausted)
    }

    /// The nonce the next successful call to [`NonceSource::next`] will return.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for NonceSource {
    fn default() -> Self {
        Self::new(0)
    }
}
