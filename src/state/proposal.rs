use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::{AppConfig, EvasionConfig};
use crate::positioning::{
    smooth_lerp, EvasivePositioner, PointerPoint, TargetBounds, ViewportPosition,
};

use super::{Phase, PhaseEvent, PhaseTimer, Step};

/// Pointer listener for the evasive target.
///
/// Exists only while the phase is `Armed`; dropping it detaches evasion.
#[derive(Debug)]
pub struct EvasionSession {
    positioner: EvasivePositioner,
    threshold: f32,
    position: Option<ViewportPosition>,
    /// Where the last glide started, and when
    glide_from: Option<(ViewportPosition, Instant)>,
}

impl EvasionSession {
    fn new(config: &EvasionConfig, rng: StdRng) -> Self {
        Self {
            positioner: EvasivePositioner::new(config.zone, config.throttle_window(), rng),
            threshold: config.threshold_px,
            position: None,
            glide_from: None,
        }
    }

    /// Current resting position; `None` until the first relocation
    pub fn position(&self) -> Option<ViewportPosition> {
        self.position
    }

    pub fn relocations(&self) -> u64 {
        self.positioner.relocations()
    }

    fn relocate_to(&mut self, next: ViewportPosition, now: Instant, glide: Duration) {
        let from = self.display_position(now, glide);
        self.glide_from = from.map(|f| (f, now));
        self.position = Some(next);
    }

    /// Position to draw at `now`, easing toward the resting position
    pub fn display_position(&self, now: Instant, glide: Duration) -> Option<ViewportPosition> {
        let target = self.position?;
        let Some((from, started)) = self.glide_from else {
            return Some(target);
        };
        if glide.is_zero() {
            return Some(target);
        }
        let t = now.saturating_duration_since(started).as_secs_f32() / glide.as_secs_f32();
        if t >= 1.0 {
            return Some(target);
        }
        Some(smooth_lerp(&from, &target, t))
    }
}

impl Drop for EvasionSession {
    fn drop(&mut self) {
        debug!(relocations = self.positioner.relocations(), "evasion listener released");
    }
}

/// State container for the whole sequence
pub struct Proposal {
    step: Step,
    phase: Phase,
    timer: PhaseTimer,
    step_duration: Duration,
    step_started: Instant,
    glide: Duration,
    evasion_config: EvasionConfig,
    evasion: Option<EvasionSession>,
    rng: StdRng,
    accepted_at: Option<DateTime<Local>>,
}

impl Proposal {
    pub fn new(config: &AppConfig, rng: StdRng, now: Instant) -> Self {
        let mut timer = PhaseTimer::new();
        timer.schedule(now, config.timing.step_duration());

        Self {
            step: Step::default(),
            phase: Phase::default(),
            timer,
            step_duration: config.timing.step_duration(),
            step_started: now,
            glide: config.timing.glide(),
            evasion_config: config.evasion.clone(),
            evasion: None,
            rng,
            accepted_at: None,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Time since the current step began
    pub fn step_elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.step_started)
    }

    pub fn time_until_next_step(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }

    pub fn evasion(&self) -> Option<&EvasionSession> {
        self.evasion.as_ref()
    }

    /// Where the evasive target should be drawn, if it has left its inline spot
    pub fn evasive_position(&self, now: Instant) -> Option<ViewportPosition> {
        self.evasion.as_ref()?.display_position(now, self.glide)
    }

    pub fn accepted_at(&self) -> Option<DateTime<Local>> {
        self.accepted_at
    }

    /// Advance on timer expiry. Returns true if the step changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.timer.fire(now) {
            self.advance(now);
            return true;
        }
        false
    }

    /// Jump past a timed step without waiting. Never skips the question.
    pub fn skip(&mut self, now: Instant) -> bool {
        if !self.step.is_timed() {
            return false;
        }
        self.timer.cancel();
        self.advance(now);
        true
    }

    fn advance(&mut self, now: Instant) {
        let from = self.step;
        self.step = self.step.next();
        self.step_started = now;

        if self.step.is_timed() {
            self.timer.schedule(now, self.step_duration);
        } else {
            self.timer.cancel();
        }

        if self.step == Step::Question {
            self.phase = self.phase.transition(PhaseEvent::Enter);
            if self.phase.is_armed() && self.evasion.is_none() {
                let rng = StdRng::seed_from_u64(self.rng.gen());
                self.evasion = Some(EvasionSession::new(&self.evasion_config, rng));
                debug!("evasion listener attached");
            }
        }

        info!(from = ?from, to = ?self.step, phase = ?self.phase, "step advanced");
    }

    /// Feed a pointer move. Returns true if the evasive target moved.
    pub fn pointer_moved(&mut self, point: PointerPoint, bounds: Option<TargetBounds>, now: Instant) -> bool {
        let glide = self.glide;
        let Some(session) = self.evasion.as_mut() else {
            return false;
        };

        let threshold = session.threshold;
        match session
            .positioner
            .on_pointer_move(point, bounds.as_ref(), threshold, now)
        {
            Some(next) => {
                self.phase = self.phase.transition(PhaseEvent::EvasiveHover);
                session.relocate_to(next, now, glide);
                true
            }
            None => false,
        }
    }

    /// A press on the evasive target. Never activates; the target hops away instead.
    pub fn press_evasive(&mut self, now: Instant) -> bool {
        self.phase = self.phase.transition(PhaseEvent::EvasivePress);
        let glide = self.glide;
        let Some(session) = self.evasion.as_mut() else {
            return false;
        };
        let next = session.positioner.generate_position();
        session.relocate_to(next, now, glide);
        debug!("press on evasive target suppressed");
        true
    }

    /// The accept control. Only effective while the question is showing.
    pub fn accept(&mut self, now: Instant, wall: DateTime<Local>) -> bool {
        if self.step != Step::Question {
            return false;
        }

        self.phase = self.phase.transition(PhaseEvent::Accept);
        if !self.phase.is_resolved() {
            return false;
        }

        self.evasion = None;
        self.timer.cancel();
        self.step = Step::Celebration;
        self.step_started = now;
        self.accepted_at = Some(wall);
        info!(at = %wall.format("%Y-%m-%d %H:%M:%S"), "proposal accepted");
        true
    }
}
