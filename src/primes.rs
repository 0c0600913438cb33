use log::info;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;

/// Number of primes held by the process-wide table.
pub const DEFAULT_PRIME_COUNT: usize = 1000;

static GLOBAL: Lazy<PrimeTable> = Lazy::new(|| PrimeTable::new(DEFAULT_PRIME_COUNT));

/// Ordered table of the first N primes. Position `i` (1-based) holds the i-th prime.
///
/// Built once and never mutated, so a shared reference can be handed to any number
/// of encoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeTable {
    primes: Vec<BigUint>,
}

impl PrimeTable {
    pub fn new(count: usize) -> Self {
        let primes = generate_primes(count);
        info!("built prime table with {} entries", primes.len());
        Self { primes }
    }

    /// The shared table of [`DEFAULT_PRIME_COUNT`] primes, built on first use.
    pub fn global() -> &'static PrimeTable {
        &GLOBAL
    }

    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    /// Zero-based lookup; `None` past the end of the table.
    pub fn get(&self, index: usize) -> Option<&BigUint> {
        self.primes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BigUint> {
        self.primes.iter()
    }
}

/// First `count` primes in ascending order, by plain trial division up to the square root.
pub fn generate_primes(count: usize) -> Vec<BigUint> {
    let mut primes = Vec::with_capacity(count);
    let mut candidate = BigUint::from(2u32);
    while primes.len() < count {
        if is_prime(&candidate) {
            primes.push(candidate.clone());
        }
        candidate += 1u32;
    }
    primes
}

fn is_prime(candidate: &BigUint) -> bool {
    if *candidate < BigUint::from(2u32) {
        return false;
    }
    let mut divisor = BigUint::from(2u32);
    while &divisor * &divisor <= *candidate {
        if (candidate % &divisor).is_zero() {
            return false;
        }
        divisor += BigUint::one();
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn small(table: &[BigUint]) -> Vec<u32> {
        table
            .iter()
            .map(|p| u32::try_from(p).expect("small prime"))
            .collect()
    }

    #[test]
    fn first_primes() {
        assert_eq!(
            small(&generate_primes(10)),
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]
        );
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(generate_primes(0).is_empty());
        assert!(PrimeTable::new(0).is_empty());
    }

    #[test]
    fn global_table_is_sized_and_ordered() {
        let table = PrimeTable::global();
        assert_eq!(table.len(), DEFAULT_PRIME_COUNT);
        assert_eq!(table.get(0), Some(&BigUint::from(2u32)));
        // the 1000th prime
        assert_eq!(table.get(999), Some(&BigUint::from(7919u32)));
        assert!(table.get(1000).is_none());
        assert!(table.iter().zip(table.iter().skip(1)).all(|(a, b)| a < b));
    }

    #[test]
    fn global_table_is_shared() {
        assert!(std::ptr::eq(PrimeTable::global(), PrimeTable::global()));
    }
}
