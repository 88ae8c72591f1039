use super::input::{FireFlag, run_input_listener};
use super::types::{GamePhase, GameStats, GameStatus, GameSummary, RenderTarget};
use crate::domain::tuning::{LauncherTuning, PlateTuning, Playfield};
use crate::domain::{Entity, SceneStore, SignalSource, Velocity};
use crate::utils::rng::roll_power;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, watch};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Timing and tuning for one session.
#[derive(Debug, Clone)]
pub struct LoopSettings {
    /// Sleep between ticks; bounds CPU use.
    pub tick_interval: Duration,
    /// Wall-clock interval between frames, independent of the tick rate.
    pub render_interval: Duration,
    /// Pause before play so the player can read the launcher settings.
    pub countdown: Duration,
    /// The session finishes once this much time has passed.
    pub game_duration: Duration,
    pub launcher: LauncherTuning,
    pub plates: PlateTuning,
}

/// The simulation loop: spawns entities, drives sweeps and paces rendering.
pub struct GameLoop<T> {
    settings: LoopSettings,
    scene: Arc<SceneStore>,
    fire: FireFlag,
    shutdown: Arc<Notify>,
    target: T,
    rng: StdRng,
    phase_tx: watch::Sender<GamePhase>,
    stats: GameStats,
}

impl<T: RenderTarget> GameLoop<T> {
    /// Builds an idle session and places the stationary Target and Launcher.
    pub fn new(
        settings: LoopSettings,
        scene: Arc<SceneStore>,
        fire: FireFlag,
        shutdown: Arc<Notify>,
        target: T,
    ) -> Self {
        scene.insert(Entity::target(settings.plates.target_anchor));
        scene.insert(Entity::launcher(settings.launcher.anchor));

        let (phase_tx, _phase_rx) = watch::channel(GamePhase::Idle);
        Self {
            settings,
            scene,
            fire,
            shutdown,
            target,
            rng: StdRng::from_os_rng(),
            phase_tx,
            stats: GameStats::default(),
        }
    }

    /// Replaces the plate power RNG, e.g. with a seeded one.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Subscribes to phase changes.
    pub fn phase(&self) -> watch::Receiver<GamePhase> {
        self.phase_tx.subscribe()
    }

    /// Runs the session until the game duration passes or a shutdown is notified.
    pub async fn run(mut self) -> GameSummary {
        if !self.count_down().await {
            info!("shutdown requested during countdown");
            return self.finish(Duration::ZERO);
        }

        self.phase_tx.send_replace(GamePhase::Running);
        info!(
            firepower = self.settings.launcher.firepower,
            angle = self.settings.launcher.angle_degrees,
            duration_secs = self.settings.game_duration.as_secs(),
            "session started"
        );

        let start = Instant::now();
        let mut last_render = start;
        let mut interval = time::interval(self.settings.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let now = start.elapsed();

            if self.fire.take() {
                self.fire_rocket(now);
            }

            if last_render.elapsed() >= self.settings.render_interval {
                self.render(now);
                last_render = Instant::now();
            }

            let hits = self.scene.collision_sweep(now);
            if hits > 0 {
                self.stats.hits += hits;
                info!(hits, total_hits = self.stats.hits, "plates intercepted");
            }

            tokio::select! {
                _ = self.shutdown.notified() => {
                    info!("shutdown requested, ending session early");
                    break;
                }
                _ = interval.tick() => {}
            }

            let elapsed = start.elapsed();
            if elapsed > self.settings.game_duration {
                break;
            }
            self.launch_plate_if_due(elapsed);
        }

        self.finish(start.elapsed())
    }

    // Shows the launcher settings once per second until play starts.
    // Returns false when a shutdown arrives first.
    async fn count_down(&mut self) -> bool {
        if self.settings.countdown.is_zero() {
            return true;
        }
        self.phase_tx.send_replace(GamePhase::Starting);

        let start = Instant::now();
        while let Some(left) = self
            .settings
            .countdown
            .checked_sub(start.elapsed())
            .filter(|left| !left.is_zero())
        {
            self.present_countdown(left);
            tokio::select! {
                _ = self.shutdown.notified() => return false,
                _ = time::sleep(left.min(Duration::from_secs(1))) => {}
            }
        }

        // Presses made while the countdown was showing do not count as shots.
        self.fire.take();
        true
    }

    fn finish(self, elapsed: Duration) -> GameSummary {
        let summary = GameSummary {
            stats: self.stats,
            elapsed,
        };
        self.phase_tx.send_replace(GamePhase::Finished);
        info!(
            shots_fired = summary.stats.shots_fired,
            hits = summary.stats.hits,
            plates_launched = summary.stats.plates_launched,
            accuracy = summary.accuracy_percent(),
            "session finished"
        );
        summary
    }

    fn fire_rocket(&mut self, now: Duration) {
        let launcher = self.settings.launcher;
        let power = roll_power(&mut self.rng, launcher.power_range());
        let velocity = Velocity::from_polar(power, f64::from(launcher.angle_degrees));
        let gravity = self.scene.playfield().gravity;
        let id = self
            .scene
            .insert(Entity::rocket(launcher.muzzle, velocity, gravity, now));
        self.stats.shots_fired += 1;
        debug!(id, power, shot = self.stats.shots_fired, "rocket fired");
    }

    // One plate per elapsed spawn interval, at most one per tick.
    fn launch_plate_if_due(&mut self, elapsed: Duration) {
        let interval_ms = self.settings.plates.spawn_interval.as_millis().max(1);
        let due = elapsed.as_millis() / interval_ms;
        if due <= u128::from(self.stats.plates_launched) {
            return;
        }

        let plates = &self.settings.plates;
        let power = roll_power(&mut self.rng, plates.power.clone());
        let velocity = Velocity::from_polar(power, plates.angle_degrees);
        let gravity = self.scene.playfield().gravity;
        let id = self
            .scene
            .insert(Entity::plate(plates.muzzle, velocity, gravity, elapsed));
        self.stats.plates_launched += 1;
        debug!(id, power, plate = self.stats.plates_launched, "plate launched");
    }

    fn status(&self, remaining: Duration, starting_in: Option<Duration>) -> GameStatus {
        GameStatus {
            stats: self.stats,
            remaining,
            live_entities: self.scene.len(),
            firepower: self.settings.launcher.firepower,
            angle_degrees: self.settings.launcher.angle_degrees,
            starting_in,
        }
    }

    fn render(&mut self, now: Duration) {
        self.target.clear();
        self.scene.prune_and_draw_sweep(now, &mut self.target);

        let status = self.status(self.settings.game_duration.saturating_sub(now), None);
        if let Err(error) = self.target.present(&status) {
            warn!(%error, "failed to present frame");
        }
    }

    // Nothing moves before play, so the countdown frame only shows the statics.
    fn present_countdown(&mut self, left: Duration) {
        self.target.clear();
        self.scene.prune_and_draw_sweep(Duration::ZERO, &mut self.target);

        let status = self.status(self.settings.game_duration, Some(left));
        if let Err(error) = self.target.present(&status) {
            warn!(%error, "failed to present countdown frame");
        }
    }
}

/// Wires a full session: scene, fire flag, input listener and loop.
///
/// The listener runs on the blocking pool and is joined before this returns.
pub async fn run_session<S, T>(
    settings: LoopSettings,
    playfield: Playfield,
    source: S,
    target: T,
    poll_timeout: Duration,
) -> GameSummary
where
    S: SignalSource + 'static,
    T: RenderTarget,
{
    let scene = Arc::new(SceneStore::new(playfield));
    let fire = FireFlag::new();
    let shutdown = Arc::new(Notify::new());
    let game = GameLoop::new(settings, scene, fire.clone(), shutdown.clone(), target);

    let phase_rx = game.phase();
    let listener = tokio::task::spawn_blocking(move || {
        run_input_listener(source, fire, phase_rx, shutdown, poll_timeout)
    });

    let summary = game.run().await;

    match listener.await {
        Ok(exit) => debug!(?exit, "input listener joined"),
        Err(error) => error!(%error, "input listener task failed"),
    }
    summary
}
