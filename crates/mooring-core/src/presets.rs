use glam::Vec3;

/// A named camera destination with per-channel transition durations.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraPreset {
    pub name: String,
    pub position: Vec3,
    pub position_duration: f32,
    /// Euler XYZ, radians.
    pub rotation: Vec3,
    pub rotation_duration: f32,
}

/// Ordered presets. Index 0 is the home view; 1..=K form the tour the
/// left/right cursor cycles through.
#[derive(Clone, Debug)]
pub struct CameraPresetRegistry {
    cameras: Vec<CameraPreset>,
    cursor: usize,
}

impl Default for CameraPresetRegistry {
    fn default() -> Self {
        let mut reg = Self::new();
        reg.new_camera("Home", Vec3::new(40.0, 40.0, 80.0), 2.0, Vec3::new(-0.23, 0.32, 0.08), 2.0);
        reg.new_camera("Chain1", Vec3::new(380.0, -690.0, 460.0), 2.0, Vec3::new(-0.55, -0.6, -0.37), 2.0);
        reg.new_camera("Chain2", Vec3::new(-380.0, -690.0, 460.0), 2.0, Vec3::new(-0.56, 0.64, 0.33), 2.0);
        reg.new_camera("Chain3", Vec3::new(380.0, -680.0, -460.0), 2.0, Vec3::new(-2.52, -0.34, -2.89), 2.0);
        reg.new_camera("Chain4", Vec3::new(-380.0, -680.0, -460.0), 2.0, Vec3::new(-2.36, 0.62, 2.65), 2.0);
        reg
    }
}

impl CameraPresetRegistry {
    pub fn new() -> Self {
        Self {
            cameras: Vec::new(),
            cursor: 1,
        }
    }

    /// Append a preset and return it.
    pub fn new_camera(
        &mut self,
        name: impl Into<String>,
        position: Vec3,
        position_duration: f32,
        rotation: Vec3,
        rotation_duration: f32,
    ) -> &CameraPreset {
        self.cameras.push(CameraPreset {
            name: name.into(),
            position,
            position_duration,
            rotation,
            rotation_duration,
        });
        &self.cameras[self.cameras.len() - 1]
    }

    pub fn camera_list(&self) -> &[CameraPreset] {
        &self.cameras
    }

    pub fn number_of_cameras(&self) -> usize {
        self.cameras.len()
    }

    pub fn get(&self, index: usize) -> Option<&CameraPreset> {
        self.cameras.get(index)
    }

    /// Number of presets reachable through the cursor (everything but home).
    pub fn tour_len(&self) -> usize {
        self.cameras.len().saturating_sub(1)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Advance the cursor, wrapping K -> 1.
    pub fn next(&mut self) -> Option<&CameraPreset> {
        let k = self.tour_len();
        if k == 0 {
            return None;
        }
        self.cursor = if self.cursor >= k { 1 } else { self.cursor + 1 };
        self.cameras.get(self.cursor)
    }

    /// Step the cursor back, wrapping 1 -> K.
    pub fn prev(&mut self) -> Option<&CameraPreset> {
        let k = self.tour_len();
        if k == 0 {
            return None;
        }
        self.cursor = if self.cursor <= 1 || self.cursor > k {
            k
        } else {
            self.cursor - 1
        };
        self.cameras.get(self.cursor)
    }

    /// Jump to a tour preset. Home (0) and out-of-range indices are rejected.
    pub fn select(&mut self, index: usize) -> Option<&CameraPreset> {
        if index == 0 || index > self.tour_len() {
            return None;
        }
        self.cursor = index;
        self.cameras.get(index)
    }

    /// The home preset; also rewinds the cursor to the first tour stop.
    pub fn reset_home(&mut self) -> Option<&CameraPreset> {
        self.cursor = 1;
        self.cameras.first()
    }
}
