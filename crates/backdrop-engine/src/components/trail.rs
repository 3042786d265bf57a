use std::collections::VecDeque;

use glam::Vec2;

/// A footprint left at `position` at simulation time `timestamp`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackMark {
    pub position: Vec2,
    pub timestamp: f32,
}

/// Bounded ring of track marks, oldest first.
/// Purely visual history: nothing in the simulation reads it back.
#[derive(Debug, Clone)]
pub struct TrackTrail {
    marks: VecDeque<TrackMark>,
    capacity: usize,
    lifetime: f32,
}

impl TrackTrail {
    const MAX_RESERVE: usize = 1024;

    /// Ring sized to hold every mark that can be alive at once when one is
    /// recorded per `interval` and each lives for `lifetime`.
    pub fn new(interval: f32, lifetime: f32) -> Self {
        let slots = (lifetime / interval).ceil();
        let capacity = if interval > 0.0 && slots.is_finite() {
            (slots as usize).saturating_add(1)
        } else {
            1
        };
        Self {
            marks: VecDeque::with_capacity(capacity.min(Self::MAX_RESERVE)),
            capacity,
            lifetime: lifetime.max(0.0),
        }
    }

    /// Record a mark, dropping the oldest if the ring is full.
    pub fn push(&mut self, mark: TrackMark) {
        if self.marks.len() == self.capacity {
            self.marks.pop_front();
        }
        self.marks.push_back(mark);
    }

    /// Evict marks older than the trail lifetime.
    pub fn evict(&mut self, now: f32) {
        while let Some(front) = self.marks.front() {
            if now - front.timestamp > self.lifetime {
                self.marks.pop_front();
            } else {
                break;
            }
        }
    }

    /// Fade factor in [0, 1] for a mark at time `now`: 1 when fresh.
    pub fn fade(&self, mark: &TrackMark, now: f32) -> f32 {
        if self.lifetime <= 0.0 {
            return 0.0;
        }
        (1.0 - (now - mark.timestamp) / self.lifetime).clamp(0.0, 1.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackMark> {
        self.marks.iter()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(t: f32) -> TrackMark {
        TrackMark { position: Vec2::new(t, 0.0), timestamp: t }
    }

    #[test]
    fn capacity_covers_lifetime() {
        let trail = TrackTrail::new(0.5, 2.0);
        assert_eq!(trail.capacity(), 5);
    }

    #[test]
    fn evicts_marks_older_than_lifetime() {
        let mut trail = TrackTrail::new(0.1, 2.0);
        trail.push(mark(0.0));
        trail.push(mark(1.0));
        trail.push(mark(2.5));
        trail.evict(3.0);
        assert_eq!(trail.len(), 2);
        assert_eq!(trail.iter().next().map(|m| m.timestamp), Some(1.0));
    }

    #[test]
    fn full_ring_drops_oldest() {
        let mut trail = TrackTrail::new(1.0, 1.0);
        for i in 0..5 {
            trail.push(mark(i as f32));
        }
        assert_eq!(trail.len(), trail.capacity());
        assert_eq!(trail.iter().next().map(|m| m.timestamp), Some(3.0));
    }

    #[test]
    fn fade_is_linear_in_age() {
        let trail = TrackTrail::new(0.1, 2.0);
        let m = mark(1.0);
        assert_eq!(trail.fade(&m, 1.0), 1.0);
        assert!((trail.fade(&m, 2.0) - 0.5).abs() < 1e-6);
        assert_eq!(trail.fade(&m, 5.0), 0.0);
    }

    #[test]
    fn huge_lifetime_saturates_capacity() {
        let trail = TrackTrail::new(0.001, 1e30);
        assert_eq!(trail.capacity(), usize::MAX);
        assert!(trail.is_empty());

        let trail = TrackTrail::new(0.1, f32::INFINITY);
        assert_eq!(trail.capacity(), 1);
    }
}
