/// All primes `p` with `2 <= p <= n`, ascending.
pub fn primes_up_to(n: usize) -> Vec<usize> {
    if n < 2 {
        return Vec::new();
    }

    let mut is_prime = vec![true; n + 1];
    is_prime[0] = false;
    is_prime[1] = false;

    let mut p = 2;
    while p * p <= n {
        if is_prime[p] {
            for multiple in (p * p..=n).step_by(p) {
                is_prime[multiple] = false;
            }
        }
        p += 1;
    }

    is_prime
        .iter()
        .enumerate()
        .filter_map(|(i, &prime)| prime.then_some(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_prime_naive(k: usize) -> bool {
        k >= 2 && (2..k).take_while(|d| d * d <= k).all(|d| k % d != 0)
    }

    #[test]
    fn empty_below_two() {
        assert!(primes_up_to(0).is_empty());
        assert!(primes_up_to(1).is_empty());
        assert_eq!(primes_up_to(2), vec![2]);
    }

    #[test]
    fn primes_up_to_thirty() {
        assert_eq!(primes_up_to(30), vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn matches_trial_division() {
        for n in [3, 4, 25, 49, 97, 100, 121, 500] {
            let expected: Vec<usize> = (0..=n).filter(|&k| is_prime_naive(k)).collect();
            assert_eq!(primes_up_to(n), expected, "n = {n}");
        }
    }

    #[test]
    fn bound_is_inclusive_for_squares_and_primes() {
        assert_eq!(primes_up_to(97).last(), Some(&97));
        assert_eq!(primes_up_to(49).last(), Some(&47));
    }

    #[test]
    fn counts_primes_below_ten_thousand() {
        assert_eq!(primes_up_to(10_000).len(), 1229);
    }
}
