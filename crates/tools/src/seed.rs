use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

static DRAWS: AtomicU64 = AtomicU64::new(0);

/// An explicit non-zero `--seed`, or `None` when one has to be drawn.
pub fn requested_seed(arg: Option<u64>) -> Option<u64> {
    arg.filter(|&seed| seed != 0)
}

/// Seed from the clock, the process id and a per-process draw counter. Never 0.
pub fn runtime_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64);
    let draw = DRAWS.fetch_add(1, Ordering::Relaxed);
    let entropy = nanos ^ (u64::from(process::id()) << 32) ^ draw.wrapping_mul(GOLDEN_GAMMA);
    avalanche(entropy).max(1)
}

fn avalanche(mut value: u64) -> u64 {
    value ^= value >> 33;
    value = value.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    value ^= value >> 33;
    value = value.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    value ^ (value >> 33)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_or_missing_seed_requests_a_draw() {
        assert_eq!(requested_seed(None), None);
        assert_eq!(requested_seed(Some(0)), None);
        assert_eq!(requested_seed(Some(4_242)), Some(4_242));
    }

    #[test]
    fn runtime_seeds_vary_and_skip_zero() {
        let first = runtime_seed();
        let second = runtime_seed();
        assert_ne!(first, second);
        assert_ne!(first, 0);
        assert_ne!(second, 0);
    }

    #[test]
    fn avalanche_separates_neighbouring_inputs() {
        assert_eq!(avalanche(0), 0);
        assert_ne!(avalanche(1), avalanche(2));
        assert!((avalanche(1) ^ avalanche(2)).count_ones() > 8);
    }
}
