//! Race simulation properties over generated fields.

use race_core::{
    rng::RaceRng,
    runner::{generate, Runner, SpeedRange},
    simulator::{max_steps, simulate},
};

#[test]
fn every_race_terminates_with_one_finisher_past_the_line() {
    let mut rng = RaceRng::from_seed(0x1234);
    for n in 1..=40u32 {
        for distance in [0.1, 5.0, 14.9, 37.0, 250.5, 1_000.0] {
            let runners = generate(n, SpeedRange::default(), &mut rng);
            let result = simulate(runners, distance).unwrap();

            assert!(result.winner.position >= distance);
            assert_eq!(result.runners.len(), n as usize);
            assert!(result.elapsed_steps >= 1);
            assert!(result.elapsed_steps <= max_steps(distance, 5));

            let in_field = result.runners.iter().filter(|r| r.id == result.winner.id).count();
            assert_eq!(in_field, 1);
            assert_eq!(result.runners[result.winner.id as usize - 1], result.winner);
        }
    }
}

#[test]
fn non_winners_are_short_of_the_line_or_lost_a_same_step_tie() {
    let mut rng = RaceRng::from_seed(0xBEEF);
    for _ in 0..200 {
        let runners = generate(12, SpeedRange::default(), &mut rng);
        let result = simulate(runners, 123.0).unwrap();
        for r in result.runners.iter().filter(|r| r.id != result.winner.id) {
            assert!(
                r.position < 123.0 || r.id > result.winner.id,
                "runner {} at {} should not beat winner {}",
                r.id,
                r.position,
                result.winner.id
            );
        }
    }
}

#[test]
fn positions_equal_speed_times_elapsed_steps() {
    // All runners move together, so every final position is speed * steps.
    let mut rng = RaceRng::from_seed(77);
    let runners = generate(30, SpeedRange::default(), &mut rng);
    let result = simulate(runners, 333.0).unwrap();
    for r in &result.runners {
        assert_eq!(r.position, f64::from(r.speed) * result.elapsed_steps as f64);
    }
}

#[test]
fn unique_fastest_runner_finishes_in_ceil_distance_over_speed() {
    let runners = vec![Runner::new(1, 6), Runner::new(2, 13), Runner::new(3, 9)];
    let result = simulate(runners, 100.0).unwrap();
    assert_eq!(result.winner.id, 2);
    assert_eq!(result.elapsed_steps, (100.0f64 / 13.0).ceil() as u64);
}

#[test]
fn monotonic_positions_step_by_step() {
    // Re-run the same field to increasing step budgets by shrinking the
    // distance to each intermediate winner position.
    let base = vec![Runner::new(1, 5), Runner::new(2, 8)];
    let mut last: Vec<f64> = vec![0.0, 0.0];
    for step in 1..=10u32 {
        let distance = f64::from(8 * step);
        let result = simulate(base.clone(), distance).unwrap();
        assert_eq!(result.elapsed_steps, u64::from(step));
        for (r, prev) in result.runners.iter().zip(&last) {
            assert!(r.position > *prev);
        }
        last = result.runners.iter().map(|r| r.position).collect();
    }
}

#[test]
fn documented_scenarios() {
    let tie = simulate(vec![Runner::new(1, 10), Runner::new(2, 10)], 25.0).unwrap();
    assert_eq!((tie.elapsed_steps, tie.winner.id), (3, 1));

    let fast = simulate(vec![Runner::new(1, 5), Runner::new(2, 15)], 20.0).unwrap();
    assert_eq!((fast.elapsed_steps, fast.winner.id), (2, 2));
    assert_eq!(fast.runners[0].position, 10.0);
}

#[test]
fn custom_speed_range_is_respected() {
    let range = SpeedRange::new(1, 2).unwrap();
    let mut rng = RaceRng::from_seed(5);
    let runners = generate(100, range, &mut rng);
    assert!(runners.iter().all(|r| r.speed == 1 || r.speed == 2));
    let result = simulate(runners, 10.0).unwrap();
    assert!(result.elapsed_steps <= max_steps(10.0, 1));
}
