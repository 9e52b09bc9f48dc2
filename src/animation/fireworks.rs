//! Fireworks particle system.
//!
//! Coordinates are normalized to the screen (0.0..1.0, y grows downward).
//! Rockets rise from the bottom edge, slow under gravity, and burst into
//! sparks that drift, fall, and fade out.

use rand::rngs::StdRng;
use rand::Rng;
use tracing::trace;

use crate::config::FireworksConfig;

/// Downward acceleration (screen heights per second squared)
const GRAVITY: f32 = 0.35;

/// Sparks per burst
const BURST_MIN: usize = 24;
const BURST_MAX: usize = 40;

/// Spark speed range (screen heights per second)
const SPARK_SPEED: (f32, f32) = (0.12, 0.32);

/// Rocket launch speed range
const ROCKET_SPEED: (f32, f32) = (0.75, 1.0);

/// Terminal cells are about twice as tall as wide; stretch sparks horizontally
const ASPECT: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleKind {
    /// Climbing shell; bursts once it reaches `burst_y` or stalls
    Rocket { burst_y: f32 },
    Spark,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// 1.0 when spawned, removed at 0.0
    pub life: f32,
    /// Life lost per second
    pub decay: f32,
    /// Hue in degrees
    pub hue: f32,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn is_rocket(&self) -> bool {
        matches!(self.kind, ParticleKind::Rocket { .. })
    }

    fn is_dead(&self) -> bool {
        self.life <= 0.0 || self.y > 1.1 || self.x < -0.1 || self.x > 1.1
    }
}

/// Running fireworks show
pub struct Fireworks {
    particles: Vec<Particle>,
    rng: StdRng,
    max_particles: usize,
    launch_interval: f32,
    since_launch: f32,
    active: bool,
    bursts: u64,
}

impl Fireworks {
    pub fn new(config: &FireworksConfig, rng: StdRng) -> Self {
        Self {
            particles: Vec::new(),
            rng,
            max_particles: config.max_particles,
            launch_interval: config.launch_interval().as_secs_f32(),
            since_launch: 0.0,
            active: false,
            bursts: 0,
        }
    }

    /// Start launching rockets; the first one goes up immediately
    pub fn start(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        self.launch();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bursts(&self) -> u64 {
        self.bursts
    }

    fn launch(&mut self) {
        self.since_launch = 0.0;
        if self.particles.len() >= self.max_particles {
            return;
        }
        let rocket = Particle {
            x: self.rng.gen_range(0.1..0.9),
            y: 1.0,
            vx: self.rng.gen_range(-0.05..0.05),
            vy: -self.rng.gen_range(ROCKET_SPEED.0..ROCKET_SPEED.1),
            life: 1.0,
            decay: 0.0,
            hue: self.rng.gen_range(0.0..360.0),
            kind: ParticleKind::Rocket {
                burst_y: self.rng.gen_range(0.15..0.45),
            },
        };
        self.particles.push(rocket);
    }

    fn burst(&mut self, x: f32, y: f32, hue: f32) -> Vec<Particle> {
        let room = self.max_particles.saturating_sub(self.particles.len());
        let count = self.rng.gen_range(BURST_MIN..=BURST_MAX).min(room);
        self.bursts += 1;
        trace!(x, y, count, "firework burst");

        (0..count)
            .map(|_| {
                let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
                let speed = self.rng.gen_range(SPARK_SPEED.0..SPARK_SPEED.1);
                Particle {
                    x,
                    y,
                    vx: angle.cos() * speed * ASPECT,
                    vy: angle.sin() * speed,
                    life: 1.0,
                    decay: self.rng.gen_range(0.6..1.0),
                    hue: (hue + self.rng.gen_range(-20.0..20.0)).rem_euclid(360.0),
                    kind: ParticleKind::Spark,
                }
            })
            .collect()
    }

    /// Advance the simulation by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        if self.active {
            self.since_launch += dt;
            if self.since_launch >= self.launch_interval {
                self.launch();
            }
        }

        let mut bursting = Vec::new();
        for p in &mut self.particles {
            p.vy += GRAVITY * dt;
            p.x += p.vx * dt;
            p.y += p.vy * dt;

            match p.kind {
                ParticleKind::Rocket { burst_y } => {
                    if p.y <= burst_y || p.vy >= 0.0 {
                        p.life = 0.0;
                        bursting.push((p.x, p.y, p.hue));
                    }
                }
                ParticleKind::Spark => {
                    // Air drag keeps bursts round instead of streaking
                    p.vx *= 1.0 - 0.8 * dt;
                    p.life -= p.decay * dt;
                }
            }
        }

        self.particles.retain(|p| !p.is_dead());

        for (x, y, hue) in bursting {
            let sparks = self.burst(x, y, hue);
            self.particles.extend(sparks);
        }
    }
}
