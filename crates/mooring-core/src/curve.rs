use crate::constants::{ANCHOR, ANCHOR_HANDLE, CHAIN_NAME_PREFIX, FAIRLEAD, FAIRLEAD_HANDLE};
use glam::Vec3;

/// Cubic Bézier curve through `start` and `end`, shaped by two handles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub start: Vec3,
    pub handle1: Vec3,
    pub handle2: Vec3,
    pub end: Vec3,
}

impl CubicBezier {
    pub const fn new(start: Vec3, handle1: Vec3, handle2: Vec3, end: Vec3) -> Self {
        Self {
            start,
            handle1,
            handle2,
            end,
        }
    }

    /// Evaluate the curve at `t` in \[0, 1\].
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        let u = 1.0 - t;
        self.start * (u * u * u)
            + self.handle1 * (3.0 * u * u * t)
            + self.handle2 * (3.0 * u * t * t)
            + self.end * (t * t * t)
    }

    /// Sample `segments + 1` evenly spaced points, endpoints included.
    ///
    /// `segments == 0` yields only the start point.
    pub fn sample_points(&self, segments: usize) -> Vec<Vec3> {
        if segments == 0 {
            return vec![self.start];
        }
        let n = segments as f32;
        (0..=segments)
            .map(|i| match i {
                0 => self.start,
                i if i == segments => self.end,
                i => self.point_at(i as f32 / n),
            })
            .collect()
    }
}

/// One mooring line: the chain instance group name plus its curve.
#[derive(Clone, Debug)]
pub struct MooringLine {
    pub name: String,
    pub curve: CubicBezier,
}

/// The four catenary-like lines fanning out from the turret, one per
/// quadrant, named `chain1`..`chain4`.
pub fn default_mooring_lines() -> Vec<MooringLine> {
    const QUADRANTS: [(f32, f32); 4] = [(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)];
    QUADRANTS
        .iter()
        .enumerate()
        .map(|(i, &(sx, sz))| {
            let mirror = Vec3::new(sx, 1.0, sz);
            MooringLine {
                name: format!("{}{}", CHAIN_NAME_PREFIX, i + 1),
                curve: CubicBezier::new(
                    FAIRLEAD,
                    FAIRLEAD_HANDLE,
                    ANCHOR_HANDLE * mirror,
                    ANCHOR * mirror,
                ),
            }
        })
        .collect()
}
