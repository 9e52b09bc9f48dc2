use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, trace};

use super::{ForbiddenZone, PointerPoint, TargetBounds, Throttle, ViewportPosition};

/// How far past the zone edge a colliding sample is pushed
pub const NUDGE_OFFSET: f32 = 15.0;

/// Candidate strips along the viewport edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeBand {
    Left,
    Right,
    Top,
    Bottom,
}

impl EdgeBand {
    pub const ALL: [EdgeBand; 4] = [EdgeBand::Left, EdgeBand::Right, EdgeBand::Top, EdgeBand::Bottom];

    /// `(left range, top range)` of the band, in percentages
    pub fn ranges(self) -> ((f32, f32), (f32, f32)) {
        match self {
            EdgeBand::Left => ((0.0, 25.0), (0.0, 100.0)),
            EdgeBand::Right => ((75.0, 100.0), (0.0, 100.0)),
            EdgeBand::Top => ((0.0, 100.0), (0.0, 25.0)),
            EdgeBand::Bottom => ((0.0, 100.0), (75.0, 100.0)),
        }
    }

    /// Sample a `(left, top)` point uniformly inside the band
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> (f32, f32) {
        let ((left_lo, left_hi), (top_lo, top_hi)) = self.ranges();
        let left = left_lo + rng.gen::<f32>() * (left_hi - left_lo);
        let top = top_lo + rng.gen::<f32>() * (top_hi - top_lo);
        (left, top)
    }
}

/// Push a point that landed inside the zone out past its nearest edges.
///
/// Each axis moves independently to `min - offset` or `max + offset`,
/// picked by which side of the zone centre the point is on. Points outside
/// the zone are returned unchanged. No clamping happens here.
pub fn nudge_out_of_zone(left: f32, top: f32, zone: &ForbiddenZone, offset: f32) -> (f32, f32) {
    if !zone.contains(left, top) {
        return (left, top);
    }

    let (center_left, center_top) = zone.center();
    let left = if left < center_left {
        zone.left_min - offset
    } else {
        zone.left_max + offset
    };
    let top = if top < center_top {
        zone.top_min - offset
    } else {
        zone.top_max + offset
    };
    (left, top)
}

/// Draw one position from a random edge band, nudged and clamped
pub fn sample_position<R: Rng + ?Sized>(rng: &mut R, zone: &ForbiddenZone) -> ViewportPosition {
    let band = EdgeBand::ALL[rng.gen_range(0..EdgeBand::ALL.len())];
    let (left, top) = band.sample(rng);
    let (left, top) = nudge_out_of_zone(left, top, zone, NUDGE_OFFSET);
    ViewportPosition::new(top, left)
}

/// Keeps a target away from a forbidden zone and from the pointer
#[derive(Debug)]
pub struct EvasivePositioner {
    zone: ForbiddenZone,
    throttle: Throttle,
    rng: StdRng,
    /// Number of positions produced so far
    relocations: u64,
}

impl EvasivePositioner {
    pub fn new(zone: ForbiddenZone, throttle_window: Duration, rng: StdRng) -> Self {
        Self {
            zone,
            throttle: Throttle::new(throttle_window),
            rng,
            relocations: 0,
        }
    }

    pub fn relocations(&self) -> u64 {
        self.relocations
    }

    /// Compute a fresh position outside the forbidden zone
    pub fn generate_position(&mut self) -> ViewportPosition {
        let position = sample_position(&mut self.rng, &self.zone);
        self.relocations += 1;
        debug!(
            top = position.top,
            left = position.left,
            relocations = self.relocations,
            "evasive target relocated"
        );
        position
    }

    /// React to a pointer move.
    ///
    /// Throttled: a call inside the window after the last processed one is
    /// dropped. A processed call returns a new position when the pointer is
    /// closer than `threshold` to the centre of `bounds`. Missing bounds
    /// (target not rendered yet) count as no signal.
    pub fn on_pointer_move(
        &mut self,
        point: PointerPoint,
        bounds: Option<&TargetBounds>,
        threshold: f32,
        now: Instant,
    ) -> Option<ViewportPosition> {
        if !self.throttle.try_acquire(now) {
            trace!(x = point.x, y = point.y, "pointer move throttled");
            return None;
        }

        let bounds = bounds?;
        let (cx, cy) = bounds.center();
        let distance = point.distance_to(cx, cy);
        if distance < threshold {
            trace!(distance, threshold, "pointer too close to evasive target");
            Some(self.generate_position())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn positioner(seed: u64) -> EvasivePositioner {
        EvasivePositioner::new(
            ForbiddenZone::default(),
            Duration::from_millis(100),
            StdRng::seed_from_u64(seed),
        )
    }

    /// Box centred on (500, 500)
    fn centered_bounds() -> TargetBounds {
        TargetBounds::new(450.0, 480.0, 100.0, 40.0)
    }

    #[test]
    fn test_generated_positions_stay_in_range_and_outside_zone() {
        let mut p = positioner(7);
        let zone = ForbiddenZone::default();

        for _ in 0..10_000 {
            let pos = p.generate_position();
            assert!((0.0..=90.0).contains(&pos.top), "top out of range: {:?}", pos);
            assert!((0.0..=90.0).contains(&pos.left), "left out of range: {:?}", pos);
            assert!(!zone.contains(pos.left, pos.top), "inside zone: {:?}", pos);
        }
        assert_eq!(p.relocations(), 10_000);
    }

    #[test]
    fn test_every_band_gets_picked() {
        let mut rng = StdRng::seed_from_u64(3);
        let zone = ForbiddenZone::default();
        let (mut left, mut right, mut top, mut bottom) = (false, false, false, false);

        for _ in 0..500 {
            let pos = sample_position(&mut rng, &zone);
            left |= pos.left < 25.0 && pos.top > 30.0 && pos.top < 70.0;
            right |= pos.left >= 75.0 && pos.top > 30.0 && pos.top < 70.0;
            top |= pos.top < 25.0 && pos.left > 30.0 && pos.left < 70.0;
            bottom |= pos.top >= 75.0 && pos.left > 30.0 && pos.left < 70.0;
        }
        assert!(left && right && top && bottom);
    }

    #[test]
    fn test_corner_nudge() {
        let zone = ForbiddenZone::default();
        let (left, top) = nudge_out_of_zone(40.0, 40.0, &zone, NUDGE_OFFSET);
        assert_eq!((left, top), (20.0, 23.0));

        let pos = ViewportPosition::new(top, left);
        assert!(pos.left <= 20.0);
        assert!(!zone.contains(pos.left, pos.top));

        let (left, top) = nudge_out_of_zone(60.0, 55.0, &zone, NUDGE_OFFSET);
        assert_eq!((left, top), (80.0, 77.0));
    }

    #[test]
    fn test_nudge_leaves_outside_points_alone() {
        let zone = ForbiddenZone::default();
        assert_eq!(nudge_out_of_zone(10.0, 50.0, &zone, NUDGE_OFFSET), (10.0, 50.0));
    }

    #[test]
    fn test_nudge_result_is_clamped_for_tight_zones() {
        // A zone hugging the bottom-right pushes past 100 before clamping
        let zone = ForbiddenZone::new(70.0, 95.0, 70.0, 95.0);
        let (left, top) = nudge_out_of_zone(90.0, 90.0, &zone, NUDGE_OFFSET);
        assert_eq!((left, top), (110.0, 110.0));
        let pos = ViewportPosition::new(top, left);
        assert_eq!((pos.top, pos.left), (90.0, 90.0));
    }

    #[test]
    fn test_pointer_near_target_relocates() {
        let mut p = positioner(1);
        let bounds = centered_bounds();
        let moved = p.on_pointer_move(PointerPoint::new(550.0, 520.0), Some(&bounds), 120.0, Instant::now());
        assert!(moved.is_some());
    }

    #[test]
    fn test_pointer_far_from_target_does_nothing() {
        let mut p = positioner(1);
        let bounds = centered_bounds();
        let moved = p.on_pointer_move(PointerPoint::new(700.0, 700.0), Some(&bounds), 120.0, Instant::now());
        assert!(moved.is_none());
        assert_eq!(p.relocations(), 0);
    }

    #[test]
    fn test_missing_bounds_is_no_signal() {
        let mut p = positioner(1);
        let moved = p.on_pointer_move(PointerPoint::new(500.0, 500.0), None, 120.0, Instant::now());
        assert!(moved.is_none());
        assert_eq!(p.relocations(), 0);
    }

    #[test]
    fn test_burst_of_close_moves_relocates_once() {
        let mut p = positioner(9);
        let bounds = centered_bounds();
        let start = Instant::now();

        let relocated = (0..10u64)
            .filter_map(|i| {
                p.on_pointer_move(
                    PointerPoint::new(500.0 + i as f32, 500.0),
                    Some(&bounds),
                    120.0,
                    start + Duration::from_millis(i * 5),
                )
            })
            .count();

        assert_eq!(relocated, 1);
        assert_eq!(p.relocations(), 1);
    }

    #[test]
    fn test_held_position_unchanged_without_qualifying_move() {
        let mut p = positioner(4);
        let held = p.generate_position();
        let mut current = held;
        let bounds = centered_bounds();
        let start = Instant::now();

        for i in 0..20u64 {
            if let Some(next) = p.on_pointer_move(
                PointerPoint::new(900.0, 900.0),
                Some(&bounds),
                120.0,
                start + Duration::from_millis(i * 150),
            ) {
                current = next;
            }
        }
        assert_eq!(current, held);
    }

    proptest! {
        #[test]
        fn prop_generated_position_valid(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let zone = ForbiddenZone::default();
            let pos = sample_position(&mut rng, &zone);
            prop_assert!((0.0..=90.0).contains(&pos.top));
            prop_assert!((0.0..=90.0).contains(&pos.left));
            prop_assert!(!zone.contains(pos.left, pos.top));
        }

        #[test]
        fn prop_nudged_point_leaves_default_zone(left in 35.0f32..=65.0, top in 38.0f32..=62.0) {
            let zone = ForbiddenZone::default();
            let (l, t) = nudge_out_of_zone(left, top, &zone, NUDGE_OFFSET);
            let pos = ViewportPosition::new(t, l);
            prop_assert!(!zone.contains(pos.left, pos.top));
            prop_assert!((0.0..=90.0).contains(&pos.top));
            prop_assert!((0.0..=90.0).contains(&pos.left));
        }
    }
}
