//! Axis-aligned collision tests
//!
//! The bird is a rectangle; pipes are a column with a passable gap. Overlap is
//! half-open on the horizontal axis.

use glam::Vec2;

use super::state::{Bird, Pipe};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Half-open horizontal overlap with the span `[x, x + width)`
    pub fn overlaps_column(&self, x: f32, width: f32) -> bool {
        self.min.x < x + width && self.max().x > x
    }
}

impl From<&Bird> for Rect {
    fn from(bird: &Bird) -> Self {
        Rect::new(bird.pos, bird.size)
    }
}

/// Bird touches the ceiling or sinks below the floor line
pub fn hits_boundary(bird: &Rect, floor_y: f32) -> bool {
    bird.max().y > floor_y || bird.min.y < 0.0
}

/// Bird overlaps the pipe column outside its gap
pub fn hits_pipe(bird: &Rect, pipe: &Pipe, pipe_width: f32) -> bool {
    bird.overlaps_column(pipe.x, pipe_width)
        && (bird.min.y < pipe.gap_top || bird.max().y > pipe.gap_bottom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bird_at(x: f32, y: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(34.0, 24.0))
    }

    #[test]
    fn test_boundary_floor_and_ceiling() {
        assert!(!hits_boundary(&bird_at(80.0, 0.0), 440.0));
        assert!(!hits_boundary(&bird_at(80.0, 416.0), 440.0));
        assert!(hits_boundary(&bird_at(80.0, 416.1), 440.0));
        assert!(hits_boundary(&bird_at(80.0, -0.1), 440.0));
    }

    #[test]
    fn test_pipe_inside_gap_is_safe() {
        let pipe = Pipe::new(70.0, 150.0, 120.0);
        assert!(!hits_pipe(&bird_at(80.0, 150.0), &pipe, 50.0));
        assert!(!hits_pipe(&bird_at(80.0, 246.0), &pipe, 50.0));
        assert!(hits_pipe(&bird_at(80.0, 149.0), &pipe, 50.0));
        assert!(hits_pipe(&bird_at(80.0, 247.0), &pipe, 50.0));
    }

    #[test]
    fn test_pipe_overlap_is_half_open() {
        // Bird at [80, 114); pipe touching either edge does not overlap
        let bird = bird_at(80.0, 0.0);
        assert!(!hits_pipe(&bird, &Pipe::new(114.0, 150.0, 120.0), 50.0));
        assert!(!hits_pipe(&bird, &Pipe::new(30.0, 150.0, 120.0), 50.0));
        assert!(hits_pipe(&bird, &Pipe::new(113.9, 150.0, 120.0), 50.0));
        assert!(hits_pipe(&bird, &Pipe::new(30.1, 150.0, 120.0), 50.0));
    }

    proptest! {
        #[test]
        fn prop_collision_iff_outside_gap(
            y in -50.0f32..500.0,
            gap_top in 50.0f32..270.0,
            pipe_x in 47.0f32..113.0,
        ) {
            let bird = bird_at(80.0, y);
            let pipe = Pipe::new(pipe_x, gap_top, 120.0);
            let outside = y < pipe.gap_top || y + 24.0 > pipe.gap_bottom;
            prop_assert_eq!(hits_pipe(&bird, &pipe, 50.0), outside);
        }

        #[test]
        fn prop_no_hit_without_horizontal_overlap(
            y in -50.0f32..500.0,
            pipe_x in prop_oneof![-200.0f32..30.0, 114.0f32..400.0],
        ) {
            let pipe = Pipe::new(pipe_x, 150.0, 120.0);
            prop_assert!(!hits_pipe(&bird_at(80.0, y), &pipe, 50.0));
        }
    }
}
