use glam::Vec2;

use crate::components::color::Palette;
use crate::components::fog::FogLayer;
use crate::components::layer::DrawLayer;
use crate::components::particle::{Particle, ParticleKind};
use crate::renderer::drawable::{Drawable, DrawableKind, PathShape};
use crate::renderer::instance::DrawList;
use crate::systems::particles::ParticleSystem;
use crate::systems::squad::FormationSquad;
use crate::systems::wanderer::StatefulWanderer;

/// Fog blob ellipses are this much flatter than they are wide.
const FOG_ASPECT: f32 = 0.35;
const TRACK_SIZE: Vec2 = Vec2::new(6.0, 10.0);
const TRACK_OPACITY: f32 = 0.5;
/// Footprints alternate this far either side of the walking line.
const TRACK_STAGGER: f32 = 3.0;
const LEADER_SIZE: Vec2 = Vec2::new(24.0, 36.0);
const FOLLOWER_SIZE: Vec2 = Vec2::new(18.0, 28.0);
const WANDERER_BODY: Vec2 = Vec2::new(28.0, 44.0);
const WANDERER_HEAD: f32 = 18.0;

/// Borrowed, read-only view of everything that gets drawn.
#[derive(Clone, Copy)]
pub struct SceneView<'a> {
    pub canvas: Vec2,
    pub fog_layers: &'a [FogLayer],
    pub particles: &'a ParticleSystem,
    pub squad: &'a FormationSquad,
    pub wanderer: &'a StatefulWanderer,
    pub palette: &'a Palette,
}

/// Project the scene into paint order: fog, ground decals, particles,
/// then actors sorted by ascending y. Clears `out` first; a canvas with
/// no area yields an empty list.
pub fn export_drawables(view: &SceneView<'_>, out: &mut Vec<Drawable>) {
    out.clear();
    if !(view.canvas.x > 0.0 && view.canvas.y > 0.0) {
        return;
    }
    push_fog(view, out);
    push_tracks(view, out);
    for p in view.particles.particles() {
        out.push(particle_drawable(p, view.canvas, view.palette).sanitized());
    }
    push_actors(view, out);
}

/// Same as [`export_drawables`], packed for the host.
pub fn build_draw_list(view: &SceneView<'_>, scratch: &mut Vec<Drawable>, list: &mut DrawList) {
    export_drawables(view, scratch);
    list.clear();
    list.extend(scratch.iter());
}

fn push_fog(view: &SceneView<'_>, out: &mut Vec<Drawable>) {
    let canvas = view.canvas;
    for layer in view.fog_layers {
        let opacity = layer.opacity();
        for blob in layer.blobs() {
            let width = blob.relative_size * canvas.x;
            let size = Vec2::new(width, width * FOG_ASPECT);
            // Drawn twice so the wrap never shows a seam.
            for x in layer.wrapped_positions(blob) {
                let origin = Vec2::new(x * canvas.x, blob.relative_y * canvas.y);
                out.push(
                    Drawable::new(DrawableKind::Oval, DrawLayer::Fog, origin, size)
                        .with_color(view.palette.fog)
                        .with_opacity(opacity)
                        .sanitized(),
                );
            }
        }
    }
}

fn push_tracks(view: &SceneView<'_>, out: &mut Vec<Drawable>) {
    let trail = view.wanderer.trail();
    let now = view.wanderer.elapsed();
    for (i, mark) in trail.iter().enumerate() {
        let stagger = if i % 2 == 0 { -TRACK_STAGGER } else { TRACK_STAGGER };
        out.push(
            Drawable::new(
                DrawableKind::Path(PathShape::Footprint),
                DrawLayer::Ground,
                mark.position + Vec2::new(0.0, stagger),
                TRACK_SIZE,
            )
            .with_color(view.palette.track)
            .with_opacity(trail.fade(mark, now) * TRACK_OPACITY)
            .sanitized(),
        );
    }
}

fn particle_drawable(p: &Particle, canvas: Vec2, palette: &Palette) -> Drawable {
    let (origin, size) = if p.kind.is_normalized() {
        (p.position * canvas, Vec2::splat(p.size * canvas.x))
    } else {
        (p.position, Vec2::splat(p.size))
    };
    let (kind, color) = match p.kind {
        // Only a retagged particle lands here. Fog layers go through `push_fog`.
        ParticleKind::Fog => (DrawableKind::Oval, palette.fog),
        ParticleKind::Smoke => (DrawableKind::Circle, palette.smoke),
        ParticleKind::Dust => (DrawableKind::Circle, palette.dust),
        ParticleKind::Collectible => (DrawableKind::Path(PathShape::Star), palette.collectible),
    };
    Drawable::new(kind, DrawLayer::Particles, origin, size)
        .with_rotation(p.rotation)
        .with_color(color)
        .with_opacity(p.opacity())
}

fn push_actors(view: &SceneView<'_>, out: &mut Vec<Drawable>) {
    // (depth, drawable): an actor's parts share its depth so the stable
    // sort keeps a head right after its body.
    let mut actors: Vec<(f32, Drawable)> = Vec::with_capacity(view.squad.actor_count() + 2);

    if view.squad.is_placed() {
        let leader = view.squad.leader();
        actors.push((
            leader.position.y,
            Drawable::new(DrawableKind::Capsule, DrawLayer::Actors, leader.position, LEADER_SIZE)
                .with_rotation(leader.heading)
                .with_color(view.palette.leader),
        ));
        for f in view.squad.followers() {
            actors.push((
                f.position.y,
                Drawable::new(DrawableKind::Capsule, DrawLayer::Actors, f.position, FOLLOWER_SIZE)
                    .with_rotation(f.heading)
                    .with_color(view.palette.follower),
            ));
        }
    }

    let w = view.wanderer;
    if w.is_placed() {
        let feet = w.actor().position;
        let pose = w.head_pose();
        let body_center = feet - Vec2::new(0.0, WANDERER_BODY.y * 0.5);
        let head_center = feet - Vec2::new(0.0, WANDERER_BODY.y + WANDERER_HEAD * 0.5 - pose.bob);
        actors.push((
            feet.y,
            Drawable::new(DrawableKind::Capsule, DrawLayer::Actors, body_center, WANDERER_BODY)
                .with_color(view.palette.wanderer),
        ));
        actors.push((
            feet.y,
            Drawable::new(
                DrawableKind::Circle,
                DrawLayer::Actors,
                head_center,
                Vec2::splat(WANDERER_HEAD),
            )
                .with_rotation(pose.tilt * w.direction())
                .with_color(view.palette.wanderer),
        ));
    }

    actors.sort_by(|a, b| a.0.total_cmp(&b.0));
    out.extend(actors.into_iter().map(|(_, d)| d.sanitized()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::{SmokeConfig, SquadConfig, WandererConfig};
    use crate::core::random::seeded;

    const CANVAS: Vec2 = Vec2::new(800.0, 600.0);

    struct Parts {
        fog: Vec<FogLayer>,
        particles: ParticleSystem,
        squad: FormationSquad,
        wanderer: StatefulWanderer,
        palette: Palette,
    }

    impl Parts {
        fn new() -> Self {
            let mut rng = seeded(9);
            let fog = (0..3)
                .map(|i| FogLayer::new(0.02 * (i + 1) as f32, 1.0, 10, &mut rng))
                .collect();
            Self {
                fog,
                particles: ParticleSystem::with_rng(SmokeConfig::default(), seeded(1)),
                squad: FormationSquad::with_rng(SquadConfig::default(), seeded(2)),
                wanderer: StatefulWanderer::with_rng(WandererConfig::default(), seeded(3)),
                palette: Palette::default(),
            }
        }

        fn run(&mut self, frames: usize) {
            let dt = 1.0 / 60.0;
            self.particles.set_canvas(CANVAS);
            for _ in 0..frames {
                self.particles.tick_spawners(dt);
                self.particles.update(dt);
                self.squad.update(dt, CANVAS, &mut self.particles);
                self.wanderer.update(dt, CANVAS);
                for layer in &mut self.fog {
                    layer.update(dt);
                }
            }
        }

        fn view(&self, canvas: Vec2) -> SceneView<'_> {
            SceneView {
                canvas,
                fog_layers: &self.fog,
                particles: &self.particles,
                squad: &self.squad,
                wanderer: &self.wanderer,
                palette: &self.palette,
            }
        }
    }

    #[test]
    fn zero_canvas_exports_nothing() {
        let mut parts = Parts::new();
        parts.run(30);
        let stale = Drawable::new(DrawableKind::Circle, DrawLayer::Fog, Vec2::ZERO, Vec2::ONE);
        let mut out = vec![stale];
        export_drawables(&parts.view(Vec2::ZERO), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn layers_arrive_back_to_front() {
        let mut parts = Parts::new();
        parts.run(120);
        let mut out = Vec::new();
        export_drawables(&parts.view(CANVAS), &mut out);
        assert!(out.windows(2).all(|w| w[0].layer <= w[1].layer));
        assert!(out.iter().any(|d| d.layer == DrawLayer::Particles));
        assert!(out.iter().any(|d| d.layer == DrawLayer::Ground));
    }

    #[test]
    fn fog_blobs_are_drawn_twice() {
        let mut parts = Parts::new();
        parts.run(1);
        let mut out = Vec::new();
        export_drawables(&parts.view(CANVAS), &mut out);
        let fog: Vec<_> = out.iter().filter(|d| d.layer == DrawLayer::Fog).collect();
        assert_eq!(fog.len(), 3 * 10 * 2);
        assert!(fog.iter().all(|d| (d.opacity - 0.1).abs() < 1e-6));
        assert!(fog.iter().all(|d| d.kind == DrawableKind::Oval));
    }

    #[test]
    fn actors_are_depth_sorted() {
        let mut parts = Parts::new();
        parts.run(240);
        let mut out = Vec::new();
        export_drawables(&parts.view(CANVAS), &mut out);
        let actors: Vec<_> = out.iter().filter(|d| d.layer == DrawLayer::Actors).collect();
        assert_eq!(actors.len(), parts.squad.actor_count() + 2);

        let squad_ys: Vec<f32> = actors
            .iter()
            .filter(|d| d.size == LEADER_SIZE || d.size == FOLLOWER_SIZE)
            .map(|d| d.origin.y)
            .collect();
        assert!(squad_ys.windows(2).all(|w| w[0] <= w[1]), "unsorted: {:?}", squad_ys);

        let body = actors.iter().position(|d| d.size == WANDERER_BODY).unwrap();
        assert_eq!(actors[body + 1].kind, DrawableKind::Circle);
    }

    #[test]
    fn exported_values_are_clamped() {
        let mut parts = Parts::new();
        parts.run(600);
        let mut out = Vec::new();
        export_drawables(&parts.view(CANVAS), &mut out);
        for d in &out {
            assert!((0.0..=1.0).contains(&d.opacity), "{:?}", d);
            assert!(d.size.x >= 0.0 && d.size.y >= 0.0, "{:?}", d);
        }
    }

    #[test]
    fn retagged_fog_particle_draws_as_oval() {
        let mut p = Particle::smoke(Vec2::new(0.5, 0.5), 0.0, 5.0, 0.1, 1.0, 0.01);
        p.kind = ParticleKind::Fog;
        let palette = Palette::default();
        let d = particle_drawable(&p, CANVAS, &palette);
        assert_eq!(d.kind, DrawableKind::Oval);
        assert_eq!(d.layer, DrawLayer::Particles);
        assert_eq!(d.origin, Vec2::new(400.0, 300.0));
        assert_eq!(d.color, palette.fog);
        assert!((d.opacity - 0.1).abs() < 1e-6);
    }

    #[test]
    fn particle_drawables_match_live_particles() {
        let mut parts = Parts::new();
        parts.run(90);
        let mut out = Vec::new();
        export_drawables(&parts.view(CANVAS), &mut out);
        let drawn = out.iter().filter(|d| d.layer == DrawLayer::Particles).count();
        assert_eq!(drawn, parts.particles.len());
    }

    #[test]
    fn draw_list_mirrors_export() {
        let mut parts = Parts::new();
        parts.run(60);
        let mut scratch = Vec::new();
        let mut list = DrawList::new();
        build_draw_list(&parts.view(CANVAS), &mut scratch, &mut list);
        assert_eq!(list.instance_count() as usize, scratch.len());
        assert_eq!(list.layer_start(DrawLayer::Fog), 0);
        assert_eq!(list.layer_start(DrawLayer::Ground), 60);
    }
}
