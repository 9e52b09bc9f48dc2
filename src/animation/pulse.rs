use std::f32::consts::PI;

/// Breathing animation (slower, more organic)
pub fn breathing(time: f32, speed: f32) -> f32 {
    let t = time * speed;
    // Combine multiple sine waves for more organic feel
    let base = (t * PI).sin();
    let harmonic = (t * PI * 2.0).sin() * 0.2;
    (base + harmonic + 1.0) / 2.4 * 0.4 + 0.6
}

/// Heartbeat animation (quick pulse followed by pause)
pub fn heartbeat(time: f32, bpm: f32) -> f32 {
    let period = 60.0 / bpm;
    let t = (time % period) / period;

    if t < 0.1 {
        // First beat
        let x = t / 0.1;
        (x * PI).sin()
    } else if t < 0.2 {
        // First beat down
        let x = (t - 0.1) / 0.1;
        (1.0 - x) * (x * PI).cos().abs()
    } else if t < 0.25 {
        // Second beat
        let x = (t - 0.2) / 0.05;
        (x * PI).sin() * 0.7
    } else {
        // Rest
        0.0
    }
}

/// Twinkle for sparks (deterministic noise)
pub fn flicker(time: f32, intensity: f32) -> f32 {
    let noise = ((time * 17.0).sin() * (time * 31.0).cos() + 1.0) / 2.0;
    1.0 - noise * intensity * 0.3
}

/// Vertical hop offset (0 or 1 rows) for the happy mascot
pub fn hop(time: f32, hops_per_sec: f32) -> u16 {
    if (time * hops_per_sec).fract() < 0.5 {
        1
    } else {
        0
    }
}
