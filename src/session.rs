//! Game session: the one object the UI shell drives
//!
//! Owns the world, the running score, the persistent records and the
//! storage backend. The shell forwards input signals and frame timestamps;
//! the session ticks the simulation, applies its events to the score and
//! stats, persists what changed and hands back `UiEvent`s for the HUD.

use crate::persistence::Storage;
use crate::platform::{FrameClock, InputSignal};
use crate::renderer::{self, RenderBackend};
use crate::score::ScoreBoard;
use crate::settings::Settings;
use crate::sim::{EventQueue, GameEvent, TickInput, Viewport, World, tick};
use crate::stats::Records;
use crate::tuning::Tuning;

/// Notifications for the HUD and overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Running total changed (also sent with 0 on restart)
    ScoreChanged { total: i64 },
    /// A new best score
    HighScore { score: u64 },
    PerfectHit,
    GoldenHit,
    /// Round over; show the overlay
    GameOver { score: i64 },
}

pub struct Session {
    world: World,
    score: ScoreBoard,
    records: Records,
    settings: Settings,
    storage: Box<dyn Storage>,
    clock: FrameClock,
    input: TickInput,
    game_over: bool,
    outbox: EventQueue<UiEvent>,
}

impl Session {
    /// Load records and settings from `storage` and build the first world
    ///
    /// The first game is not counted in `games_played`; only restarts are.
    pub fn new(tuning: Tuning, viewport: Viewport, seed: u64, storage: Box<dyn Storage>) -> Self {
        let records = Records::load(storage.as_ref());
        let settings = Settings::load(storage.as_ref());
        log::info!("Session started with seed {seed}");
        Self {
            world: World::new(tuning, viewport, seed),
            score: ScoreBoard::new(),
            records,
            settings,
            storage,
            clock: FrameClock::new(),
            input: TickInput::default(),
            game_over: false,
            outbox: EventQueue::new(),
        }
    }

    /// Start a fresh game in place
    pub fn restart(&mut self) {
        self.world.reset();
        self.score.reset();
        self.clock.restart();
        self.input = TickInput::default();
        self.game_over = false;
        self.records.increment_games_played();
        self.records.persist_if_dirty(self.storage.as_mut());
        self.outbox.send(UiEvent::ScoreChanged { total: 0 });
        log::info!("Game restarted ({} played)", self.records.stats().games_played);
    }

    /// Begin holding; returns true if the frame loop should be running
    pub fn press_start(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.input.pressed = true;
        true
    }

    pub fn press_end(&mut self) {
        if self.game_over {
            return;
        }
        self.input.pressed = false;
    }

    /// Apply an input signal; returns true if the frame loop should be running
    pub fn handle(&mut self, signal: InputSignal) -> bool {
        match signal {
            InputSignal::PressStart => self.press_start(),
            InputSignal::PressEnd => {
                self.press_end();
                false
            }
            InputSignal::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Run one frame at `timestamp_ms`
    ///
    /// Ticks the world (skipped on the first frame after a restart), applies
    /// its events, writes dirty records and renders if a backend is given.
    /// Returns false once the round is over and its effects have settled.
    pub fn frame(&mut self, timestamp_ms: f64, backend: Option<&mut dyn RenderBackend>) -> bool {
        if let Some(elapsed) = self.clock.advance(timestamp_ms) {
            tick(&mut self.world, &self.input, elapsed);
        }
        self.dispatch_events();
        self.records.persist_if_dirty(self.storage.as_mut());

        if let Some(backend) = backend {
            renderer::render(&self.world, &self.settings, timestamp_ms, backend);
        }
        self.keep_running()
    }

    /// Draw the current world without advancing it
    pub fn draw(&self, timestamp_ms: f64, backend: &mut dyn RenderBackend) {
        renderer::render(&self.world, &self.settings, timestamp_ms, backend);
    }

    fn keep_running(&self) -> bool {
        let effects = &self.world.effects;
        !self.game_over || effects.flash.active || effects.camera_shake > 0.0
    }

    fn dispatch_events(&mut self) {
        let mut events = std::mem::take(&mut self.world.events);
        for event in events.drain() {
            match event {
                GameEvent::Scored { increment } => {
                    let best = self.records.high_score();
                    let total = self.score.increment(i64::from(increment), &mut self.records);
                    self.outbox.send(UiEvent::ScoreChanged { total });
                    if self.records.high_score() > best {
                        self.outbox.send(UiEvent::HighScore { score: self.records.high_score() });
                    }
                }
                GameEvent::PerfectHit => {
                    self.records.increment_perfect_jumps();
                    self.outbox.send(UiEvent::PerfectHit);
                }
                GameEvent::GoldenHit => self.outbox.send(UiEvent::GoldenHit),
                GameEvent::StickStretched { length } => self.records.update_longest_stick(length),
                GameEvent::StickDropped { hit, perfect } => {
                    log::debug!("Stick dropped: hit {hit}, perfect {perfect}");
                }
                GameEvent::GameOver => {
                    self.game_over = true;
                    self.input.pressed = false;
                    log::info!("Game over with score {}", self.score.total());
                    self.outbox.send(UiEvent::GameOver { score: self.score.total() });
                }
            }
        }
    }

    /// Take the UI events produced since the last call
    pub fn drain_ui_events(&mut self) -> Vec<UiEvent> {
        self.outbox.drain().collect()
    }

    pub fn resize(&mut self, viewport: Viewport) {
        log::debug!("Viewport {}x{}", viewport.width, viewport.height);
        self.world.viewport = viewport;
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn score(&self) -> i64 {
        self.score.total()
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.settings.save(self.storage.as_mut());
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;
    use crate::renderer::RecordingBackend;
    use crate::sim::{GamePhase, Platform};

    struct Driver {
        session: Session,
        now: f64,
    }

    impl Driver {
        fn new(storage: MemoryStorage) -> Self {
            let mut session =
                Session::new(Tuning::default(), Viewport::default(), 4242, Box::new(storage));
            let world = session.world_mut();
            world.platforms.truncate(1);
            world.platforms.push(Platform { x: 200.0, w: 40.0, golden: false });
            let mut driver = Self { session, now: 1000.0 };
            driver.session.frame(driver.now, None);
            driver
        }

        fn run(&mut self, total: f64) -> bool {
            let mut running = true;
            let mut elapsed = 0.0;
            while elapsed < total {
                self.now += 20.0;
                elapsed += 20.0;
                running = self.session.frame(self.now, None);
            }
            running
        }

        /// Hold long enough to grow a stick of `length`, release and let it turn
        fn jump(&mut self, length: f64) {
            assert!(self.session.press_start());
            self.run(20.0);
            self.run(length * 4.0);
            self.session.press_end();
            self.run(20.0);
            self.run(360.0);
        }
    }

    #[test]
    fn test_perfect_jump_updates_score_and_records() {
        let mut driver = Driver::new(MemoryStorage::new());
        driver.jump(120.0);
        assert_eq!(driver.session.world().phase, GamePhase::Walking);
        assert_eq!(driver.session.score(), 2);

        let events = driver.session.drain_ui_events();
        assert_eq!(
            events,
            vec![
                UiEvent::ScoreChanged { total: 2 },
                UiEvent::HighScore { score: 2 },
                UiEvent::PerfectHit,
            ]
        );

        let records = driver.session.records();
        assert_eq!(records.high_score(), 2);
        assert_eq!(records.stats().perfect_jumps, 1);
        assert_eq!(records.stats().longest_stick, 120.0);
        assert!(!records.is_dirty());

        let reloaded = Records::load(driver.session.storage());
        assert_eq!(reloaded.high_score(), 2);
        assert_eq!(reloaded.stats().perfect_jumps, 1);
    }

    #[test]
    fn test_high_score_event_only_when_beaten() {
        let mut storage = MemoryStorage::new();
        storage.set_item(Records::HIGH_SCORE_KEY, "10").unwrap();
        let mut driver = Driver::new(storage);
        driver.jump(120.0);
        let events = driver.session.drain_ui_events();
        assert!(events.contains(&UiEvent::ScoreChanged { total: 2 }));
        assert!(!events.iter().any(|e| matches!(e, UiEvent::HighScore { .. })));
        assert_eq!(driver.session.records().high_score(), 10);
    }

    #[test]
    fn test_miss_ends_round_and_gates_input() {
        let mut driver = Driver::new(MemoryStorage::new());
        driver.jump(40.0);
        driver.run(2_000.0);
        assert!(driver.session.is_game_over());

        let game_overs = driver
            .session
            .drain_ui_events()
            .into_iter()
            .filter(|e| *e == UiEvent::GameOver { score: 0 })
            .count();
        assert_eq!(game_overs, 1);

        assert!(!driver.session.press_start());
        assert!(!driver.session.handle(InputSignal::PressStart));

        // Flash and shake settle, then the loop can stop
        assert!(!driver.run(1_500.0));
        assert!(driver.session.drain_ui_events().is_empty());
    }

    #[test]
    fn test_restart_counts_games_and_resets_score() {
        let mut driver = Driver::new(MemoryStorage::new());
        assert_eq!(driver.session.records().stats().games_played, 0);
        driver.jump(120.0);
        driver.session.drain_ui_events();

        assert!(driver.session.handle(InputSignal::Restart));
        assert_eq!(driver.session.score(), 0);
        assert!(!driver.session.is_game_over());
        assert_eq!(driver.session.world().phase, GamePhase::Waiting);
        assert_eq!(driver.session.records().stats().games_played, 1);
        assert_eq!(driver.session.drain_ui_events(), vec![UiEvent::ScoreChanged { total: 0 }]);

        let reloaded = Records::load(driver.session.storage());
        assert_eq!(reloaded.stats().games_played, 1);
        assert_eq!(reloaded.high_score(), 2);
    }

    #[test]
    fn test_first_frame_after_restart_does_not_tick() {
        let mut driver = Driver::new(MemoryStorage::new());
        driver.session.restart();
        driver.session.press_start();
        driver.now += 5_000.0;
        driver.session.frame(driver.now, None);
        assert_eq!(driver.session.world().phase, GamePhase::Waiting);
        driver.run(20.0);
        assert_eq!(driver.session.world().phase, GamePhase::Stretching);
    }

    #[test]
    fn test_frame_renders_when_backend_given() {
        let mut driver = Driver::new(MemoryStorage::new());
        let mut backend = RecordingBackend::new();
        driver.now += 16.0;
        driver.session.frame(driver.now, Some(&mut backend as &mut dyn RenderBackend));
        assert_eq!(backend.frames, 1);
        assert!(backend.count("rect") > 0);
    }

    #[test]
    fn test_settings_persist() {
        let mut driver = Driver::new(MemoryStorage::new());
        let settings = Settings { reduced_motion: true, ..Default::default() };
        driver.session.set_settings(settings);
        assert_eq!(Settings::load(driver.session.storage()), settings);
    }
}
