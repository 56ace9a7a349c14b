//! Scene drawing
//!
//! Z-order: background, particles, player, obstacles, HUD, then at most one
//! overlay picked by phase (game over > paused > start screen).

use glam::Vec2;

use super::{BACKGROUND, Color, Font, INK, OVERLAY, Sprite, Surface};
use crate::consts::*;
use crate::sim::{Camera, Particle, ParticleShape, Rect, SessionPhase, World};

/// Dash length of the road edge markings
const DASH: f32 = 40.0;

/// Loaded (or loading) images for the scene
#[derive(Debug)]
pub struct Sprites<I> {
    pub vehicle: Option<I>,
    /// Indexed by obstacle variant
    pub obstacles: Vec<I>,
}

impl<I> Default for Sprites<I> {
    fn default() -> Self {
        Self {
            vehicle: None,
            obstacles: Vec::new(),
        }
    }
}

/// Draw one frame of `world`
pub fn render<S: Surface>(world: &World, sprites: &Sprites<S::Image>, surface: &mut S) {
    surface.fill_rect(Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT), BACKGROUND);

    let camera = Camera::follow(&world.player, &world.profile);
    surface.save();
    surface.scale(camera.zoom);
    surface.translate(-camera.origin);

    draw_road_marks(world, surface);
    for particle in &world.particles {
        draw_particle(particle, surface);
    }
    draw_player(world, sprites, surface);
    for obstacle in &world.obstacles {
        let rect = Rect::new(obstacle.x, obstacle.y, obstacle.width, obstacle.height);
        draw_sprite(sprites.obstacles.get(obstacle.variant), rect, surface);
    }
    surface.restore();

    surface.fill_text(
        &format!("Score: {}", world.score),
        Vec2::new(20.0, 40.0),
        Font::Body,
        INK,
    );

    match world.phase {
        SessionPhase::GameOver => {
            draw_overlay(surface, "Game Over", "hit the space bar to play again!")
        }
        SessionPhase::Paused => draw_overlay(surface, "Paused", "press P to resume"),
        SessionPhase::StartScreen => draw_overlay(surface, "Auto Rush", "press space to start"),
        SessionPhase::Playing => {}
    }
}

/// Dashed edges of the play band, scrolling with the movement speed
fn draw_road_marks<S: Surface>(world: &World, surface: &mut S) {
    let color = INK.with_alpha(0.15);
    let edges = [
        world.profile.top_padding / 2.0,
        CANVAS_HEIGHT - world.profile.bottom_padding / 2.0,
    ];
    let mut x = -(world.scroll % (DASH * 2.0));
    while x < CANVAS_WIDTH {
        for y in edges {
            surface.fill_rect(Rect::new(x, y - 2.0, DASH, 4.0), color);
        }
        x += DASH * 2.0;
    }
}

fn draw_particle<S: Surface>(particle: &Particle, surface: &mut S) {
    let color = INK.with_alpha(particle.opacity);
    let radii = match particle.shape {
        ParticleShape::Circle => Vec2::splat(particle.radius),
        ParticleShape::Ellipse => Vec2::new(particle.width, particle.height),
    };
    surface.save();
    surface.translate(particle.pos);
    surface.rotate(particle.rotation);
    // Three offset copies fake a soft blur
    for i in 0..3 {
        let offset = (i as f32 - 1.0) * particle.blur;
        surface.fill_ellipse(Vec2::splat(offset), radii, color);
    }
    surface.restore();
}

fn draw_player<S: Surface>(world: &World, sprites: &Sprites<S::Image>, surface: &mut S) {
    let player = &world.player;
    let (w, h) = (player.width, player.height);
    surface.save();
    surface.translate(Vec2::new(player.x + w / 2.0, player.y + h / 2.0));
    surface.rotate(player.rotation.to_radians());
    draw_sprite(sprites.vehicle.as_ref(), Rect::new(-w / 2.0, -h / 2.0, w, h), surface);
    surface.restore();
}

/// Image if loaded, solid placeholder otherwise
fn draw_sprite<S: Surface>(image: Option<&S::Image>, rect: Rect, surface: &mut S) {
    match image {
        Some(image) if image.is_ready() => surface.draw_image(image, rect),
        _ => surface.fill_rect(rect, INK),
    }
}

fn draw_overlay<S: Surface>(surface: &mut S, title: &str, subtitle: &str) {
    surface.fill_rect(Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT), OVERLAY);
    let y = CANVAS_HEIGHT / 2.0 - 20.0;
    draw_centered(surface, title, y, Font::Title, INK);
    draw_centered(surface, subtitle, y + 40.0, Font::Body, INK);
}

fn draw_centered<S: Surface>(surface: &mut S, text: &str, y: f32, font: Font, color: Color) {
    let width = surface.measure_text(text, font);
    surface.fill_text(text, Vec2::new((CANVAS_WIDTH - width) / 2.0, y), font, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;
    use crate::sim::{Lane, Obstacle, Player, Scripted, particle};

    #[derive(Debug)]
    struct TestImage {
        name: &'static str,
        ready: bool,
    }

    impl Sprite for TestImage {
        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Rect(Rect, Color),
        Ellipse,
        Image(&'static str),
        Text(String),
        Save,
        Restore,
        Transform,
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Recorder {
        fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(t) => Some(t.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn position(&self, want: &Op) -> Option<usize> {
            self.ops.iter().position(|op| op == want)
        }
    }

    impl Surface for Recorder {
        type Image = TestImage;

        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.ops.push(Op::Rect(rect, color));
        }
        fn fill_ellipse(&mut self, _center: Vec2, _radii: Vec2, _color: Color) {
            self.ops.push(Op::Ellipse);
        }
        fn draw_image(&mut self, image: &TestImage, _rect: Rect) {
            self.ops.push(Op::Image(image.name));
        }
        fn fill_text(&mut self, text: &str, _pos: Vec2, _font: Font, _color: Color) {
            self.ops.push(Op::Text(text.to_string()));
        }
        fn measure_text(&mut self, text: &str, _font: Font) -> f32 {
            text.len() as f32 * 10.0
        }
        fn save(&mut self) {
            self.ops.push(Op::Save);
        }
        fn restore(&mut self) {
            self.ops.push(Op::Restore);
        }
        fn translate(&mut self, _offset: Vec2) {
            self.ops.push(Op::Transform);
        }
        fn rotate(&mut self, _angle: f32) {
            self.ops.push(Op::Transform);
        }
        fn scale(&mut self, _factor: f32) {
            self.ops.push(Op::Transform);
        }
    }

    fn sprites(ready: bool) -> Sprites<TestImage> {
        Sprites {
            vehicle: Some(TestImage { name: "vehicle", ready }),
            obstacles: (0..OBSTACLE_VARIANTS)
                .map(|_| TestImage { name: "obstacle", ready })
                .collect(),
        }
    }

    fn busy_world() -> World {
        let mut w = World::new(Profile::desktop(), Player::new(90.0, 60.0), 0, false);
        w.start();
        w.score = 12;
        particle::emit(&mut w.particles, &w.player.clone(), 2, &mut Scripted::constant(0.4));
        w.obstacles.push(Obstacle {
            x: 500.0,
            y: 40.0,
            width: 60.0,
            height: 70.0,
            variant: 2,
            lane: Lane::Top,
        });
        w
    }

    #[test]
    fn test_z_order() {
        let w = busy_world();
        let mut rec = Recorder::default();
        render(&w, &sprites(true), &mut rec);

        assert_eq!(
            rec.ops[0],
            Op::Rect(Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT), BACKGROUND)
        );
        let first_particle = rec.position(&Op::Ellipse).unwrap();
        let player = rec.position(&Op::Image("vehicle")).unwrap();
        let obstacle = rec.position(&Op::Image("obstacle")).unwrap();
        let hud = rec.position(&Op::Text("Score: 12".into())).unwrap();
        assert!(first_particle < player && player < obstacle && obstacle < hud);
        // Three blur copies per particle
        assert_eq!(rec.ops.iter().filter(|op| **op == Op::Ellipse).count(), 6);
        // Playing: HUD only, no overlay
        assert_eq!(rec.texts(), vec!["Score: 12"]);
        let saves = rec.ops.iter().filter(|op| **op == Op::Save).count();
        let restores = rec.ops.iter().filter(|op| **op == Op::Restore).count();
        assert_eq!(saves, restores);
    }

    #[test]
    fn test_overlay_precedence() {
        let cases = [
            (SessionPhase::StartScreen, "Auto Rush"),
            (SessionPhase::Paused, "Paused"),
            (SessionPhase::GameOver, "Game Over"),
        ];
        for (phase, title) in cases {
            let mut w = busy_world();
            w.phase = phase;
            let mut rec = Recorder::default();
            render(&w, &sprites(true), &mut rec);
            let texts = rec.texts();
            assert_eq!(texts.len(), 3, "{phase:?}: {texts:?}");
            assert_eq!(texts[1], title);
            let overlays = rec
                .ops
                .iter()
                .filter(|op| matches!(op, Op::Rect(_, c) if *c == OVERLAY))
                .count();
            assert_eq!(overlays, 1);
        }
    }

    #[test]
    fn test_unloaded_images_fall_back_to_placeholders() {
        let w = busy_world();
        let mut rec = Recorder::default();
        render(&w, &sprites(false), &mut rec);
        assert!(!rec.ops.iter().any(|op| matches!(op, Op::Image(_))));
        assert!(rec.ops.contains(&Op::Rect(Rect::new(-45.0, -30.0, 90.0, 60.0), INK)));
        assert!(rec.ops.contains(&Op::Rect(Rect::new(500.0, 40.0, 60.0, 70.0), INK)));

        // Missing variants also fall back
        let mut rec = Recorder::default();
        render(&w, &Sprites::default(), &mut rec);
        assert!(rec.ops.contains(&Op::Rect(Rect::new(500.0, 40.0, 60.0, 70.0), INK)));
    }

    #[test]
    fn test_render_leaves_world_untouched() {
        let w = busy_world();
        let before = serde_json::to_string(&w).unwrap();
        for phase in [SessionPhase::Playing, SessionPhase::GameOver] {
            let mut w = w.clone();
            w.phase = phase;
            let expected = serde_json::to_string(&w).unwrap();
            render(&w, &sprites(true), &mut Recorder::default());
            assert_eq!(serde_json::to_string(&w).unwrap(), expected);
        }
        assert_eq!(serde_json::to_string(&w).unwrap(), before);
    }
}
