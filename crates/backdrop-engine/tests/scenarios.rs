use backdrop_engine::core::random::seeded;
use backdrop_engine::{
    DrawLayer, FogLayer, FormationSquad, ParticleKind, ParticleSystem, Simulation, SimulationConfig,
    SmokeConfig, SquadConfig, TransitionCause, WandererState,
};
use glam::Vec2;

const CANVAS: Vec2 = Vec2::new(800.0, 600.0);

#[test]
fn zero_canvas_right_after_construction() {
    let mut sim = Simulation::default();
    sim.tick(0.0, 0.0, 0.016);
    assert!(sim.export_drawables().is_empty());

    // Negative and NaN sizes are treated the same way.
    sim.tick(-10.0, f32::NAN, 0.016);
    assert!(sim.export_drawables().is_empty());
}

#[test]
fn smoke_past_its_life_is_gone_after_one_update() {
    let mut particles = ParticleSystem::with_rng(SmokeConfig::default(), seeded(3));
    particles.set_canvas(CANVAS);
    assert!(particles.spawn(ParticleKind::Smoke, Vec2::new(0.5, 0.95)));
    assert_eq!(particles.particles()[0].max_life(), 5.0);
    particles.update(5.1);
    assert_eq!(particles.count_of(ParticleKind::Smoke), 0);
}

#[test]
fn reached_target_is_replaced_in_the_same_update() {
    let mut particles = ParticleSystem::with_rng(SmokeConfig::default(), seeded(4));
    particles.set_canvas(CANVAS);
    let mut squad = FormationSquad::with_rng(SquadConfig::default(), seeded(4));
    assert_eq!(squad.actor_count(), 5);

    squad.update(1.0 / 60.0, CANVAS, &mut particles);
    let near = squad.leader().position + Vec2::new(10.0, 0.0);
    squad.set_target(near);
    squad.update(1.0 / 60.0, CANVAS, &mut particles);

    assert_ne!(squad.target(), near);
    assert!(squad.target_elapsed() < 1.0 / 60.0 + 1e-6);
    let t = squad.target();
    assert!(t.x >= 0.0 && t.x <= CANVAS.x && t.y >= 0.0 && t.y <= CANVAS.y);
}

#[test]
fn fog_returns_to_start_after_one_period() {
    let mut rng = seeded(11);
    let mut layer = FogLayer::new(0.05, 1.0, 10, &mut rng);
    let start = layer.scroll_offset();
    // 1 / 0.05 = 20 seconds in 0.05s frames.
    for _ in 0..400 {
        layer.update(0.05);
        assert!((0.0..1.0).contains(&layer.scroll_offset()));
    }
    let end = layer.scroll_offset();
    let drift = (end - start).abs().min(1.0 - (end - start).abs());
    assert!(drift < 1e-3, "drift {}", drift);
}

#[test]
fn long_run_keeps_every_invariant() {
    let mut sim = Simulation::new(SimulationConfig { seed: 99, ..Default::default() });
    let leader_max = sim.config().squad.leader_max_speed;
    let follower_max = leader_max * sim.config().squad.follower_speed_factor;
    let mut states = vec![sim.wanderer().state()];

    let dt = 1.0 / 30.0;
    for frame in 0..(200.0 / dt) as usize {
        // Occasional resize and stalled frame.
        let canvas = if frame % 900 < 450 { CANVAS } else { Vec2::new(420.0, 760.0) };
        let step = if frame % 500 == 0 { 0.5 } else { dt };
        let timer_before = sim.wanderer().state_timer();
        let tick = sim.tick(canvas.x, canvas.y, step);
        assert!(tick.dt <= 0.1);

        for p in sim.particles().particles() {
            assert!(p.remaining_life() > 0.0 && p.remaining_life() <= p.max_life());
        }
        assert!(sim.squad().leader().speed() <= leader_max + 1e-3);
        for f in sim.squad().followers() {
            assert!(f.speed() <= follower_max + 1e-3);
        }
        if let Some(t) = sim.last_transition() {
            if t.cause == TransitionCause::TimerExpired {
                assert!(timer_before - tick.dt <= 1e-5);
            }
            states.push(t.to);
        }
        assert!(sim.wanderer().state_timer() >= 0.0);

        let drawables = sim.export_drawables();
        assert!(drawables.windows(2).all(|w| w[0].layer <= w[1].layer));
        let particles = drawables.iter().filter(|d| d.layer == DrawLayer::Particles).count();
        assert_eq!(particles, sim.particles().len());
    }

    for state in WandererState::ALL {
        assert!(states.contains(&state), "{:?} never entered", state);
    }
}

#[test]
fn config_from_json_drives_the_simulation() {
    let json = r#"{
        "seed": 5,
        "fog": { "layer_count": 2 },
        "squad": { "size": 3 },
        "smoke": { "spawn_interval_ms": 50 }
    }"#;
    let config = SimulationConfig::from_json(json).unwrap();
    let mut sim = Simulation::new(config);
    sim.tick(CANVAS.x, CANVAS.y, 0.1);

    assert_eq!(sim.fog_layers().len(), 2);
    assert_eq!(sim.squad().actor_count(), 3);
    assert_eq!(sim.particles().count_of(ParticleKind::Smoke), 2);

    let fog = sim.export_drawables().iter().filter(|d| d.layer == DrawLayer::Fog).count();
    assert_eq!(fog, 2 * 10 * 2);
}

#[test]
fn extreme_config_values_are_clamped_not_fatal() {
    let cases = [
        r#"{ "smoke": { "max_life": 1e30 } }"#,
        r#"{ "wanderer": { "mark_lifetime": 1e30 } }"#,
        r#"{ "smoke": { "jitter": 3.4e38 } }"#,
        r#"{ "squad": { "size": 100000000 }, "fog": { "blob_count": 100000000 } }"#,
    ];
    for json in cases {
        let config = SimulationConfig::from_json(json).unwrap();
        let mut sim = Simulation::new(config);
        for _ in 0..10 {
            sim.tick(CANVAS.x, CANVAS.y, 0.1);
        }
        assert!(sim.squad().actor_count() <= 64, "{}", json);
        for d in sim.export_drawables() {
            assert!(d.origin.is_finite(), "{}: {:?}", json, d);
        }
    }
}
