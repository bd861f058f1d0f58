use glam::Vec3;

/// Quadratic ease-out: fast start, gentle arrival.
#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Time-based interpolation of a vector toward a target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec3Tween {
    from: Vec3,
    to: Vec3,
    duration_sec: f32,
    elapsed_sec: f32,
}

impl Vec3Tween {
    pub fn new(from: Vec3, to: Vec3, duration_sec: f32) -> Self {
        Self {
            from,
            to,
            duration_sec,
            elapsed_sec: 0.0,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.duration_sec <= 0.0 || self.elapsed_sec >= self.duration_sec
    }

    pub fn value(&self) -> Vec3 {
        if self.is_finished() {
            return self.to;
        }
        let k = ease_out_quad(self.elapsed_sec / self.duration_sec);
        self.from.lerp(self.to, k)
    }

    /// Step forward by `dt_sec` and return the new value.
    pub fn advance(&mut self, dt_sec: f32) -> Vec3 {
        self.elapsed_sec = (self.elapsed_sec + dt_sec.max(0.0)).min(self.duration_sec.max(0.0));
        self.value()
    }
}
