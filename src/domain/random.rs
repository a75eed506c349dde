use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

static CALLS: AtomicU64 = AtomicU64::new(0);

/// Seed from wall-clock nanoseconds, mixed with a call counter so two calls
/// landing on the same clock tick still diverge.
fn time_seed() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let nanos = now.as_secs().wrapping_mul(1_000_000_000) ^ u64::from(now.subsec_nanos());
    let call = CALLS.fetch_add(1, Ordering::Relaxed);
    nanos ^ call.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Random string of `n` ASCII letters. Not suitable for secrets.
pub fn random_string(n: usize) -> String {
    let mut rng = StdRng::seed_from_u64(time_seed());
    (0..n)
        .map(|_| char::from(LETTERS[rng.random_range(0..LETTERS.len())]))
        .collect()
}
