//! Headless fluid surface.
//!
//! A render target that models what a fluid view would draw without drawing
//! anything: the amplitude profile in force, the fill animation, the color,
//! and the goal progress that determines the level.

use super::{AnimationTarget, Schedule};
use crate::config::WaveConfig;
use crate::core::{AmplitudeProfile, Phase, ProgressLevel, Rgba};
use crate::machine::Continuation;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Goals completed out of goals set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub done: u32,
    pub total: u32,
}

impl Progress {
    pub fn new(done: u32, total: u32) -> Self {
        Self { done, total }
    }

    /// Completed share of the goals, `0.0` when no goals are set.
    ///
    /// # Example
    ///
    /// ```rust
    /// use waterline::target::Progress;
    ///
    /// assert_eq!(Progress::new(2, 5).fraction(), 0.4);
    /// assert_eq!(Progress::new(3, 0).fraction(), 0.0);
    /// ```
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.done) / f64::from(self.total)
        }
    }

    /// Check if every goal is done (and there is at least one)
    pub fn is_complete(&self) -> bool {
        self.done > 0 && self.done >= self.total
    }
}

/// Linear fill animation between two levels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillAnimation {
    pub from: f64,
    pub to: f64,
    pub started_at: Duration,
    pub duration: Duration,
}

impl FillAnimation {
    /// A fill resting at `level`.
    pub fn at_rest(level: f64) -> Self {
        Self {
            from: level,
            to: level,
            started_at: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }

    /// Level drawn at clock reading `now`.
    pub fn level_at(&self, now: Duration) -> f64 {
        if self.duration.is_zero() || now >= self.started_at.saturating_add(self.duration) {
            return self.to;
        }
        let elapsed = now.saturating_sub(self.started_at);
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * t
    }
}

/// Reference render target driven by goal progress.
#[derive(Clone, Debug)]
pub struct FluidSurface {
    settle_delay: Duration,
    fill_duration: Duration,
    low: AmplitudeProfile,
    high: AmplitudeProfile,
    amplitude: AmplitudeProfile,
    fill: FillAnimation,
    color: Rgba,
    progress: Progress,
    settled_level: Option<f64>,
    completions: usize,
}

impl FluidSurface {
    /// Create a calm, empty surface using the timings and profiles of `config`.
    pub fn new(config: &WaveConfig) -> Self {
        let empty = config.level_bounds.clamp(0.0).value();
        Self {
            settle_delay: config.settle_delay,
            fill_duration: config.fill_duration,
            low: config.low,
            high: config.high,
            amplitude: config.low,
            fill: FillAnimation::at_rest(empty),
            color: config.palette.color(Phase::Idle),
            progress: Progress::default(),
            settled_level: None,
            completions: 0,
        }
    }

    /// Replace the goal progress.
    ///
    /// Only the stored value changes; the shell notifies the machine itself.
    pub fn set_progress(&mut self, progress: Progress) {
        self.progress = progress;
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Amplitude profile currently applied to the waves
    pub fn amplitude(&self) -> AmplitudeProfile {
        self.amplitude
    }

    pub fn fill(&self) -> &FillAnimation {
        &self.fill
    }

    /// Fill level drawn at clock reading `now`
    pub fn fill_level(&self, now: Duration) -> f64 {
        self.fill.level_at(now)
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Level the waves last came to rest at
    pub fn settled_level(&self) -> Option<f64> {
        self.settled_level
    }

    /// Number of times the surface came to rest with every goal done
    pub fn completions(&self) -> usize {
        self.completions
    }

    fn come_to_rest(&mut self) {
        self.amplitude = self.low;
        self.settled_level = Some(self.fill.to);
        if self.progress.is_complete() {
            self.completions += 1;
            info!(
                done = self.progress.done,
                total = self.progress.total,
                "All goals complete"
            );
        }
    }
}

impl AnimationTarget for FluidSurface {
    fn begin_amplify(&mut self, schedule: &mut Schedule<'_, Self>) {
        self.amplitude = self.high;
        schedule.after(self.settle_delay, Continuation::request(Phase::Leveling));
    }

    fn begin_level_change(&mut self, level: ProgressLevel, schedule: &mut Schedule<'_, Self>) {
        let now = schedule.now();
        self.fill = FillAnimation {
            from: self.fill.level_at(now),
            to: level.value(),
            started_at: now,
            duration: self.fill_duration,
        };
        debug!(from = self.fill.from, to = self.fill.to, "Filling");
        schedule.after(self.fill_duration, Continuation::request(Phase::Damping));
    }

    fn begin_damp(&mut self, schedule: &mut Schedule<'_, Self>) {
        schedule.after(
            self.settle_delay,
            Continuation::then_request(FluidSurface::come_to_rest, Phase::Idle),
        );
    }

    fn refresh_color(&mut self, color: Rgba) {
        self.color = color;
    }

    fn level(&self) -> f64 {
        self.progress.fraction()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::WaveStateMachine;

    fn setup() -> (WaveStateMachine<FluidSurface>, FluidSurface) {
        let config = WaveConfig::default();
        let surface = FluidSurface::new(&config);
        (WaveStateMachine::new(config), surface)
    }

    #[test]
    fn progress_without_goals_is_empty_and_incomplete() {
        let progress = Progress::new(0, 0);
        assert_eq!(progress.fraction(), 0.0);
        assert!(!progress.is_complete());
    }

    #[test]
    fn progress_completes_when_all_goals_done() {
        assert!(Progress::new(5, 5).is_complete());
        assert!(!Progress::new(4, 5).is_complete());
    }

    #[test]
    fn fill_interpolates_linearly() {
        let fill = FillAnimation {
            from: 0.2,
            to: 0.6,
            started_at: Duration::from_secs(10),
            duration: Duration::from_secs(4),
        };

        assert_eq!(fill.level_at(Duration::from_secs(9)), 0.2);
        assert!((fill.level_at(Duration::from_secs(12)) - 0.4).abs() < 1e-9);
        assert_eq!(fill.level_at(Duration::from_secs(20)), 0.6);
    }

    #[test]
    fn fill_with_unbounded_duration_stays_at_start() {
        let fill = FillAnimation {
            from: 0.2,
            to: 0.6,
            started_at: Duration::from_secs(10),
            duration: Duration::MAX,
        };

        assert_eq!(fill.level_at(Duration::from_secs(9)), 0.2);
        assert!((fill.level_at(Duration::from_secs(12)) - 0.2).abs() < 1e-9);
        assert_eq!(fill.level_at(Duration::MAX), 0.6);
    }

    #[test]
    fn retarget_with_unbounded_fill_duration_keeps_leveling() {
        let config = WaveConfig {
            fill_duration: Duration::MAX,
            ..WaveConfig::default()
        };
        let mut surface = FluidSurface::new(&config);
        let mut machine = WaveStateMachine::new(config);

        surface.set_progress(Progress::new(1, 5));
        machine.on_level_changed(&mut surface);
        machine.advance_to(Duration::from_secs(2), &mut surface);
        assert_eq!(machine.phase(), Phase::Leveling);

        surface.set_progress(Progress::new(2, 5));
        assert!(machine.on_level_changed(&mut surface));

        assert_eq!(machine.phase(), Phase::Leveling);
        assert_eq!(surface.fill().to, 0.4);
        assert_eq!(surface.fill_level(Duration::from_secs(2)), 0.01);
    }

    #[test]
    fn new_surface_is_calm_and_empty() {
        let config = WaveConfig::default();
        let surface = FluidSurface::new(&config);

        assert_eq!(surface.amplitude(), AmplitudeProfile::LOW);
        assert_eq!(surface.fill_level(Duration::ZERO), 0.01);
        assert_eq!(surface.color(), config.palette.idle);
    }

    #[test]
    fn amplify_raises_waves() {
        let (mut machine, mut surface) = setup();
        surface.set_progress(Progress::new(1, 5));

        machine.on_level_changed(&mut surface);

        assert_eq!(surface.amplitude(), AmplitudeProfile::HIGH);
        assert_eq!(surface.color(), machine.config().palette.amplifying);
    }

    #[test]
    fn cycle_fills_to_progress_and_calms_waves() {
        let (mut machine, mut surface) = setup();
        surface.set_progress(Progress::new(2, 5));

        machine.on_level_changed(&mut surface);
        machine.advance_to(Duration::from_secs(4), &mut surface);
        assert!((surface.fill_level(Duration::from_secs(4)) - 0.205).abs() < 1e-9);

        machine.advance_to(Duration::from_secs(60), &mut surface);

        assert_eq!(machine.phase(), Phase::Idle);
        assert_eq!(surface.amplitude(), AmplitudeProfile::LOW);
        assert_eq!(surface.settled_level(), Some(0.4));
        assert_eq!(surface.completions(), 0);
    }

    #[test]
    fn completing_every_goal_counts_a_completion() {
        let (mut machine, mut surface) = setup();
        surface.set_progress(Progress::new(5, 5));

        machine.on_level_changed(&mut surface);
        machine.advance_to(Duration::from_secs(60), &mut surface);

        assert_eq!(surface.completions(), 1);
        assert_eq!(surface.settled_level(), Some(0.99));
    }

    #[test]
    fn stale_damp_leaves_waves_agitated() {
        let (mut machine, mut surface) = setup();
        surface.set_progress(Progress::new(1, 5));
        machine.on_level_changed(&mut surface);
        machine.advance_to(Duration::from_secs(6), &mut surface);
        assert_eq!(machine.phase(), Phase::Damping);

        surface.set_progress(Progress::new(2, 5));
        machine.on_level_changed(&mut surface);
        machine.advance_to(Duration::from_secs(8), &mut surface);

        assert_eq!(surface.settled_level(), None);
        assert_eq!(surface.amplitude(), AmplitudeProfile::HIGH);
    }
}
