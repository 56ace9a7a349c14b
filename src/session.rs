//! Game session
//!
//! Owns the world, the fixed-step clock, the random source and the persisted
//! preferences. Simulation events are applied here: best scores and unlocks
//! are written through to storage before anything reads them again.

use rand_pcg::Pcg32;

use crate::consts::UNLOCK_SCORE;
use crate::platform::input::{InputEvent, RawInput, translate};
use crate::prefs::{KeyValueStore, Preferences};
use crate::renderer::{Sprites, Surface, render};
use crate::settings::Settings;
use crate::sim::{FixedStep, GameEvent, Player, World, seeded, tick};
use crate::vehicles::Vehicle;

/// Toast text shown when the milestone unlocks every vehicle
pub const UNLOCK_MESSAGE: &str = "All vehicles unlocked!";

/// Sink for short user-facing messages
pub trait Notifier {
    fn show(&mut self, message: &str);
}

pub struct Session<S: KeyValueStore, N: Notifier> {
    world: World,
    clock: FixedStep,
    rng: Pcg32,
    prefs: Preferences<S>,
    notifier: N,
    vehicle: &'static Vehicle,
}

impl<S: KeyValueStore, N: Notifier> Session<S, N> {
    pub fn new(settings: &Settings, store: S, notifier: N, seed: u64) -> Self {
        let mut prefs = Preferences::new(store);
        let vehicle = prefs.selected_vehicle();
        let profile = settings.profile();
        let player = Player::for_vehicle(vehicle, &profile);
        let mut world = World::new(profile, player, prefs.personal_best(), prefs.all_unlocked());
        log::info!(
            "Session ready: vehicle {}, best {}, {:?} profile",
            vehicle.name,
            world.personal_best,
            world.profile.class
        );
        if settings.start_immediately {
            world.start();
        }

        Self {
            world,
            clock: FixedStep::new(),
            rng: seeded(seed),
            prefs,
            notifier,
            vehicle,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn vehicle(&self) -> &'static Vehicle {
        self.vehicle
    }

    pub fn prefs(&self) -> &Preferences<S> {
        &self.prefs
    }

    pub fn handle(&mut self, input: InputEvent) {
        match input {
            InputEvent::Start => self.world.start(),
            InputEvent::SlideStart => self.world.set_sliding(true),
            InputEvent::SlideEnd => self.world.set_sliding(false),
            InputEvent::TogglePause => self.world.toggle_pause(),
            InputEvent::Restart => {
                self.world.restart();
                self.clock.clear();
            }
        }
    }

    /// Map and apply a device event
    pub fn handle_raw(&mut self, raw: &RawInput) {
        if let Some(input) = translate(raw, self.world.phase) {
            self.handle(input);
        }
    }

    /// Run exactly one simulation step
    pub fn step(&mut self) {
        for event in tick(&mut self.world, &mut self.rng) {
            self.apply(event);
        }
    }

    /// Feed a display timestamp (ms) and run the steps it buys
    pub fn update(&mut self, timestamp_ms: f64) -> u32 {
        let steps = self.clock.advance(timestamp_ms);
        for _ in 0..steps {
            self.step();
        }
        steps
    }

    /// One display callback: simulate, then draw exactly once
    pub fn frame<F: Surface>(
        &mut self,
        timestamp_ms: f64,
        sprites: &Sprites<F::Image>,
        surface: &mut F,
    ) -> u32 {
        let steps = self.update(timestamp_ms);
        render(&self.world, sprites, surface);
        steps
    }

    /// The vehicle sprite failed to load. Switches to the default vehicle
    /// (persisted) and returns it, or `None` if the default itself failed.
    pub fn vehicle_load_failed(&mut self) -> Option<&'static Vehicle> {
        let fallback = self.prefs.fallback_after_load_failure(self.vehicle.id)?;
        log::warn!(
            "Vehicle {} unavailable, falling back to {}",
            self.vehicle.id,
            fallback.id
        );
        self.vehicle = fallback;

        let resized = Player::for_vehicle(fallback, &self.world.profile);
        let player = &mut self.world.player;
        player.width = resized.width;
        player.height = resized.height;
        player.clamp_to_bounds(&self.world.profile);
        Some(fallback)
    }

    fn apply(&mut self, event: GameEvent) {
        match event {
            GameEvent::GameOver { score } => {
                log::info!("Run over: score {}, best {}", score, self.world.personal_best);
            }
            GameEvent::PersonalBest(score) => {
                if self.prefs.record_score(score) {
                    log::info!("New personal best: {}", score);
                }
            }
            GameEvent::VehiclesUnlocked => {
                self.prefs.unlock_all();
                log::info!("Reached {} points, every vehicle unlocked", UNLOCK_SCORE);
                self.notifier.show(UNLOCK_MESSAGE);
            }
        }
    }
}
