//! Prime capacity sizing.
//!
//! A partition store sized to a prime number of buckets avoids the systematic
//! collision clustering a non-prime modulus produces. This runs once at store
//! construction, so plain trial division is plenty.

/// Returns the smallest prime greater than or equal to `n`.
pub fn next_prime(n: usize) -> usize {
    let mut candidate = n.max(2);
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    // 6k +/- 1 wheel.
    let mut i = 5;
    while i * i <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_prime_known_values() {
        assert_eq!(next_prime(0), 2);
        assert_eq!(next_prime(1), 2);
        assert_eq!(next_prime(2), 2);
        assert_eq!(next_prime(8), 11);
        assert_eq!(next_prime(10), 11);
        assert_eq!(next_prime(14), 17);
        assert_eq!(next_prime(7919), 7919);
        assert_eq!(next_prime(25229), 25229);
    }

    #[test]
    fn test_next_prime_result_is_prime_and_not_below_input() {
        for n in 0..2000 {
            let p = next_prime(n);
            assert!(p >= n, "next_prime({}) = {} is below input", n, p);
            assert!(is_prime(p), "next_prime({}) = {} is not prime", n, p);
            // Minimality: nothing prime between n and p.
            for m in n..p {
                assert!(!is_prime(m), "{} is a smaller prime than {}", m, p);
            }
        }
    }
}
