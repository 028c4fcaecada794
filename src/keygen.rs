//! Key Generator
//!
//! Short random keys for new clipboard entries: `KEY_BYTES` bytes from the
//! OS random source, hex-encoded lowercase.

use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;
use tracing::debug;

use crate::store::{KvStore, StoreError};

/// Random bytes drawn per key
pub const KEY_BYTES: usize = 3;

/// Length of a generated key in characters
pub const KEY_LENGTH: usize = KEY_BYTES * 2;

// == Keygen Error ==
#[derive(Error, Debug)]
pub enum KeygenError {
    #[error("random source failure: {0}")]
    Random(#[from] rand::Error),

    #[error("existence check failed: {0}")]
    Store(#[from] StoreError),
}

/// Draws a fresh candidate key from `rng`.
pub fn random_key<R: RngCore + ?Sized>(rng: &mut R) -> Result<String, rand::Error> {
    let mut bytes = [0u8; KEY_BYTES];
    rng.try_fill_bytes(&mut bytes)?;
    Ok(bytes.iter().map(|b| format!("{:02x}", b)).collect())
}

/// Checks that `key` has the shape of a generated key.
pub fn is_valid_key(key: &str) -> bool {
    key.len() == KEY_LENGTH
        && key
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Returns a key that was absent from `store` when it was checked.
///
/// Redraws until the existence check comes back negative. The key may still
/// be claimed by a concurrent writer before the caller uses it.
pub async fn generate_unique_key(store: &dyn KvStore) -> Result<String, KeygenError> {
    generate_unique_key_with(&mut OsRng, store).await
}

pub async fn generate_unique_key_with<R>(
    rng: &mut R,
    store: &dyn KvStore,
) -> Result<String, KeygenError>
where
    R: RngCore + Send + ?Sized,
{
    loop {
        let key = random_key(rng)?;
        if !store.exists(&key).await? {
            return Ok(key);
        }
        debug!(key = %key, "generated key already in use, redrawing");
    }
}
