//! Probabilistic primality testing for field moduli.
//!
//! Moduli that fit in a machine word are checked deterministically with
//! `primal`. Anything larger goes through Miller-Rabin with random bases;
//! the number of rounds is caller-configurable because the acceptable
//! false-positive rate depends on what the field is protecting.

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, ToPrimitive, Zero};

/// How hard to try before accepting a modulus as prime.
///
/// A Miller-Rabin round rejects a composite with probability at least 3/4,
/// so the chance of accepting a composite is at most `4^-rounds`. The
/// default of 64 rounds pushes that below 2^-128, which is negligible for
/// cryptographic-size moduli. Callers that only ever construct fields over
/// known primes can pass a smaller round count to speed up construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimalityConfig {
    /// Number of Miller-Rabin rounds for moduli wider than 64 bits.
    pub rounds: usize,
}

impl PrimalityConfig {
    pub fn new(rounds: usize) -> Self {
        PrimalityConfig { rounds }
    }
}

impl Default for PrimalityConfig {
    fn default() -> Self {
        PrimalityConfig { rounds: 64 }
    }
}

/// Returns true if `n` is prime (for word-sized `n`, with certainty; for
/// larger `n`, except with probability at most `4^-rounds`).
pub fn is_prime(n: &BigUint, cfg: &PrimalityConfig) -> bool {
    // Word-sized candidates get the exact answer regardless of the
    // configured round count.
    if let Some(small) = n.to_u64() {
        return primal::is_prime(small);
    }

    if (n % 2u32).is_zero() {
        log::debug!("rejected even {}-bit candidate", n.bits());
        return false;
    }

    miller_rabin(n, cfg.rounds)
}

// n is odd and wider than 64 bits here.
fn miller_rabin(n: &BigUint, rounds: usize) -> bool {
    let one = BigUint::one();
    let two = &one + &one;
    let n_minus_one = n - &one;

    // Write n - 1 = d * 2^s with d odd.
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while (&d % 2u32).is_zero() {
        d >>= 1;
        s += 1;
    }

    let mut rng = rand::thread_rng();
    'witness: for _ in 0..rounds {
        // Uniform base in [2, n-2].
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = a.modpow(&d, n);
        if x == one || x == n_minus_one {
            continue;
        }
        for _ in 0..s - 1 {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        log::debug!("found composite witness for {}-bit candidate", n.bits());
        return false;
    }

    log::debug!(
        "accepted {}-bit candidate after {} miller-rabin rounds",
        n.bits(),
        rounds
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moduli::SECP256K1_P;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn small_values_are_exact() {
        init();
        let cfg = PrimalityConfig::default();
        for p in &[2u64, 3, 5, 13, 17, 19, 9223372036854775783] {
            assert!(is_prime(&BigUint::from(*p), &cfg), "{} should be prime", p);
        }
        for c in &[0u64, 1, 4, 6, 9, 15, 21, 1 << 40] {
            assert!(!is_prime(&BigUint::from(*c), &cfg), "{} is composite", c);
        }
    }

    #[test]
    fn secp256k1_prime_passes() {
        init();
        assert!(is_prime(&SECP256K1_P, &PrimalityConfig::default()));
    }

    #[test]
    fn large_composites_fail() {
        init();
        let cfg = PrimalityConfig::default();
        // 3 * P is composite but odd.
        assert!(!is_prime(&(&*SECP256K1_P * 3u32), &cfg));
        // P + 1 is even.
        assert!(!is_prime(&(&*SECP256K1_P + 1u32), &cfg));
        // 2^127 + 1 is divisible by 3.
        assert!(!is_prime(&((BigUint::one() << 127) + 1u32), &cfg));
    }

    #[test]
    fn mersenne_127_is_prime() {
        init();
        let m127 = (BigUint::one() << 127) - 1u32;
        assert!(is_prime(&m127, &PrimalityConfig::default()));
    }

    #[test]
    fn round_count_is_tunable() {
        init();
        // One round is plenty for an even composite and never wrong for a
        // real prime, just less certain for odd composites.
        let quick = PrimalityConfig::new(1);
        assert!(is_prime(&SECP256K1_P, &quick));
        assert!(!is_prime(&(&*SECP256K1_P + 1u32), &quick));
    }
}
