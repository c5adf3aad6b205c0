//! Deliberate mistakes: occasionally swap the best move for a weaker one.

use rand::{Rng, RngExt};

use crate::scorer::Scored;

/// Chance that a mistake is drawn from the bottom band rather than the middle one.
const BOTTOM_BAND_CHANCE: f64 = 0.7;

/// Index into `ranked` of the move to play. Usually 0; with probability
/// `rate` a lower-ranked move from the bottom 30% (70% of the time) or the
/// 30–70% band. Self-atari moves are never picked as mistakes.
pub fn pick<R: Rng + ?Sized>(ranked: &[Scored], rate: f64, rng: &mut R) -> usize {
    let pool: Vec<usize> = ranked
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.breakdown.self_atari)
        .map(|(i, _)| i)
        .collect();
    if pool.len() < 2 || rng.random::<f64>() >= rate {
        return 0;
    }

    let n = pool.len();
    let (start, end) = if rng.random_bool(BOTTOM_BAND_CHANCE) {
        (((n as f64 * 0.7) as usize).clamp(1, n - 1), n)
    } else {
        let start = ((n as f64 * 0.3) as usize).max(1);
        let end = ((n as f64 * 0.7).ceil() as usize).clamp(start + 1, n);
        (start.min(n - 1), end)
    };
    pool[rng.random_range(start..end)]
}

#[cfg(test)]
mod tests {
    use go_engine::{Goban, Stone};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::movegen::{MoveRequest, full_scan};
    use crate::scorer::Breakdown;

    fn ranked(n: usize) -> Vec<Scored> {
        let goban = Goban::with_dimensions(5, 5);
        full_scan(&MoveRequest::new(&goban, Stone::Black, 0))
            .into_iter()
            .take(n)
            .enumerate()
            .map(|(i, candidate)| Scored {
                candidate,
                breakdown: Breakdown::default(),
                score: -(i as f64),
            })
            .collect()
    }

    #[test]
    fn zero_rate_keeps_the_best() {
        let mut rng = StdRng::seed_from_u64(7);
        let list = ranked(10);
        for _ in 0..100 {
            assert_eq!(pick(&list, 0.0, &mut rng), 0);
        }
    }

    #[test]
    fn mistakes_come_from_the_lower_bands() {
        let mut rng = StdRng::seed_from_u64(11);
        let list = ranked(20);
        let mut bottom = 0;
        for _ in 0..1000 {
            let i = pick(&list, 1.0, &mut rng);
            assert!(i >= 6, "picked {i}");
            if i >= 14 {
                bottom += 1;
            }
        }
        assert!(bottom > 500, "bottom band hit {bottom} times");
    }

    #[test]
    fn never_picks_self_atari() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut list = ranked(4);
        for s in &mut list[1..3] {
            s.breakdown.self_atari = true;
        }
        for _ in 0..200 {
            assert!(matches!(pick(&list, 1.0, &mut rng), 0 | 3));
        }
    }

    #[test]
    fn single_candidate_is_kept() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick(&ranked(1), 1.0, &mut rng), 0);
    }
}
