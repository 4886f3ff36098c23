use noblebox::core::{Species, SystemState};
use proptest::prelude::*;

/// Containment invariant: no particle ever ends an advance outside the
/// enclosure, and the collision counter never decreases.
#[test]
fn particles_stay_contained_over_many_steps() -> noblebox::error::Result<()> {
    let mut state = SystemState::new(Some(12345));
    for species in Species::ALL {
        for _ in 0..8 {
            state.add_particle(species)?;
        }
    }

    let mut last_count = state.collisions();
    for step in 0..500 {
        state.update_positions(0.01)?;
        let bounds = state.bounds();
        for (i, p) in state.particles.iter().enumerate() {
            assert!(
                bounds.contains(p.x, p.y),
                "particle {i} escaped to ({}, {}) at step {step}",
                p.x,
                p.y
            );
        }
        assert!(
            state.collisions() >= last_count,
            "collision counter went backwards at step {step}"
        );
        last_count = state.collisions();
    }
    // Thermal speeds are hundreds of m/s; 5 time units of flight in a
    // 2500-unit box must have produced wall hits.
    assert!(state.collisions() > 0, "no collisions in 500 steps");
    Ok(())
}

/// A particle sitting on the left wall and moving into it bounces once:
/// vx flips positive, the counter advances by exactly one.
#[test]
fn left_wall_bounce_flips_vx_and_counts_once() -> noblebox::error::Result<()> {
    let mut state = SystemState::new(Some(99));
    state.add_particle(Species::Neon)?;
    state.particles[0].x = 0.0;
    state.particles[0].y = 1200.0;
    state.particles[0].vx = -340.0;
    state.particles[0].vy = 0.0;

    let before = state.collisions();
    state.update_positions(0.01)?;

    let p = &state.particles[0];
    assert_eq!(p.vx, 340.0);
    assert_eq!(p.vy, 0.0);
    assert_eq!(p.y, 1200.0);
    assert_eq!(state.collisions(), before + 1);
    Ok(())
}

/// Helium launched at the right wall from x=2499 with vx=200 over dt=1:
/// one bounce, reflected vx, final position back inside.
#[test]
fn helium_right_wall_scenario() -> noblebox::error::Result<()> {
    let mut state = SystemState::new(Some(77));
    state.add_particle(Species::Helium)?;
    state.particles[0].x = 2499.0;
    state.particles[0].y = 1000.0;
    state.particles[0].vx = 200.0;
    state.particles[0].vy = 0.0;

    let before = state.collisions();
    state.update_positions(1.0)?;

    let p = &state.particles[0];
    assert_eq!(p.vx, -200.0);
    assert!(p.x <= state.width());
    // 0.005 to the wall, then 199 units back along the reflected leg.
    assert!((p.x - 2301.0).abs() < 1e-9, "x = {}", p.x);
    assert_eq!(state.collisions(), before + 1);
    Ok(())
}

/// The counter advances by exactly the number of bounce events in a
/// step: one bouncing particle and one free-flight particle give +1.
#[test]
fn counter_advances_by_exactly_the_bounce_events() -> noblebox::error::Result<()> {
    let mut state = SystemState::new(Some(21));
    state.add_particle(Species::Argon)?;
    state.add_particle(Species::Argon)?;
    // First particle hits the ceiling once; second drifts freely.
    state.particles[0].x = 1000.0;
    state.particles[0].y = 2499.0;
    state.particles[0].vx = 0.0;
    state.particles[0].vy = 500.0;
    state.particles[1].x = 1000.0;
    state.particles[1].y = 1000.0;
    state.particles[1].vx = 10.0;
    state.particles[1].vy = -10.0;

    state.update_positions(0.01)?;

    assert_eq!(state.collisions(), 1);
    assert_eq!(state.particles[0].vy, -500.0);
    assert!((state.particles[0].y - 2496.0).abs() < 1e-9);
    assert_eq!(state.particles[1].vx, 10.0);
    Ok(())
}

/// Shrinking the enclosure below a particle clamps it onto the new
/// ceiling, flips vy, and leaves the collision counter untouched.
#[test]
fn height_shrink_is_not_a_collision() -> noblebox::error::Result<()> {
    let mut state = SystemState::new(Some(31));
    state.add_particle(Species::Krypton)?;
    state.particles[0].y = 2200.0;
    state.particles[0].vy = 90.0;
    let before = state.collisions();

    state.update_height(800.0)?;

    assert_eq!(state.particles[0].y, 800.0);
    assert_eq!(state.particles[0].vy, -90.0);
    assert_eq!(state.collisions(), before);

    // The clamped particle keeps obeying containment on later steps.
    state.update_positions(0.01)?;
    let bounds = state.bounds();
    let p = &state.particles[0];
    assert!(bounds.contains(p.x, p.y));
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Containment holds for arbitrary in-bounds states and velocities
    /// far beyond thermal, across repeated steps.
    #[test]
    fn containment_holds_for_arbitrary_states(
        x in 0.0..=2500.0f64,
        y in 0.0..=2500.0f64,
        vx in -50_000.0..50_000.0f64,
        vy in -50_000.0..50_000.0f64,
    ) {
        let mut state = SystemState::new(Some(0));
        state.add_particle(Species::Helium).unwrap();
        state.particles[0].x = x;
        state.particles[0].y = y;
        state.particles[0].vx = vx;
        state.particles[0].vy = vy;

        let mut last_count = state.collisions();
        for _ in 0..20 {
            state.update_positions(0.01).unwrap();
            let bounds = state.bounds();
            let p = &state.particles[0];
            prop_assert!(bounds.contains(p.x, p.y), "({}, {}) escaped", p.x, p.y);
            prop_assert!(state.collisions() >= last_count);
            last_count = state.collisions();
        }
    }
}
