//! Six-sided dice rolls.

use rand::Rng;

/// Roll a single d6 (1-6).
pub fn d6(rng: &mut impl Rng) -> i32 {
    rng.gen_range(1..=6)
}

/// Roll 2d6 (2-12).
pub fn two_d6(rng: &mut impl Rng) -> i32 {
    d6(rng) + d6(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..10000 {
            assert!((1..=6).contains(&d6(&mut rng)));
            assert!((2..=12).contains(&two_d6(&mut rng)));
        }
    }

    #[test]
    fn test_two_d6_peaks_at_seven() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut counts = [0u32; 13];
        for _ in 0..10000 {
            counts[two_d6(&mut rng) as usize] += 1;
        }
        assert!(counts[7] > counts[2]);
        assert!(counts[7] > counts[12]);
    }
}
