use glam::Vec3;

// Shared scene tuning constants used by the web frontend and host tests.

// Mooring lines
pub const CHAIN_SAMPLES: usize = 1500; // curve segments per mooring line
pub const CHAIN_POOL_CAPACITY: usize = 1500; // instanced links allocated per line
pub const CHAIN_NAME_PREFIX: &str = "chain";
pub const MOORING_LINE_COUNT: usize = 4;
pub const FAIRLEAD: Vec3 = Vec3::new(0.0, -2.0, 0.0); // shared start of every line
pub const FAIRLEAD_HANDLE: Vec3 = Vec3::new(0.0, -750.0, 0.0);
pub const ANCHOR_HANDLE: Vec3 = Vec3::new(750.0, -850.0, 750.0); // mirrored per quadrant
pub const ANCHOR: Vec3 = Vec3::new(1250.0, -1000.0, 1250.0); // mirrored per quadrant

// Link template (closed loop swept as a tube)
pub const LINK_PROFILE: [Vec3; 8] = [
    Vec3::new(0.0, 0.5, -0.75),
    Vec3::new(0.0, 0.5, 0.75),
    Vec3::new(0.0, 0.25, 1.0),
    Vec3::new(0.0, -0.25, 1.0),
    Vec3::new(0.0, -0.5, 0.75),
    Vec3::new(0.0, -0.5, -0.75),
    Vec3::new(0.0, -0.25, -1.0),
    Vec3::new(0.0, 0.25, -1.0),
];
pub const LINK_TUBULAR_SEGMENTS: usize = 20;
pub const LINK_RADIUS: f32 = 0.2;
pub const LINK_RADIAL_SEGMENTS: usize = 16;
pub const LINK_PICK_RADIUS: f32 = 1.25; // bounding sphere of one link

// Materials (0xRRGGBB, sRGB)
pub const METAL_COLOR: u32 = 0xcfcfcf;
pub const METAL_METALNESS: f32 = 1.0;
pub const METAL_ROUGHNESS: f32 = 1.0;
pub const HIGHLIGHT_COLOR: u32 = 0xff2e2e;

// Camera
pub const CAMERA_FOV_Y_DEGREES: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 5000.0;
pub const CAMERA_START_EYE: Vec3 = Vec3::new(40.0, 40.0, 80.0);
pub const CAMERA_START_TARGET: Vec3 = Vec3::new(10.0, 20.0, 0.0);

// Free-fly controls
pub const FLY_MOVEMENT_SPEED: f32 = 50.0; // units per second
pub const FLY_ROLL_SPEED: f32 = 0.5; // radians per second
pub const FLY_SLOW_MULTIPLIER: f32 = 0.1; // applied while Shift is held

// Boundary volume the camera may not leave
pub const BOUNDARY_CENTER: Vec3 = Vec3::new(0.0, 10.0, 0.0);
pub const BOUNDARY_SIZE: f32 = 1950.0;

// Water
pub const WATER_SIZE: f32 = 2500.0;
pub const WATER_TIME_STEP: f32 = 0.5 / 60.0; // per frame, not per second
pub const WATER_COLOR: u32 = 0x001e0f;
pub const SUN_COLOR: u32 = 0xffffff;
pub const WATER_DISTORTION_SCALE: f32 = 3.7;

// Sky
pub const SKY_TURBIDITY: f32 = 10.0;
pub const SKY_RAYLEIGH: f32 = 2.0;
pub const SKY_MIE_COEFFICIENT: f32 = 0.005;
pub const SKY_MIE_DIRECTIONAL_G: f32 = 0.8;
pub const SUN_ELEVATION_DEGREES: f32 = 4.0;
pub const SUN_AZIMUTH_DEGREES: f32 = 0.0;

// Ocean volume and floor
pub const OCEAN_VOLUME_SIZE: Vec3 = Vec3::new(2500.0, 1000.0, 2500.0);
pub const OCEAN_VOLUME_CENTER: Vec3 = Vec3::new(0.0, -501.0, 0.0);
pub const OCEAN_VOLUME_COLOR: u32 = 0x001a33;
pub const SEA_FLOOR_SIZE: Vec3 = Vec3::new(2500.0, 10.0, 2500.0);
pub const SEA_FLOOR_CENTER: Vec3 = Vec3::new(0.0, -1001.0, 0.0);
pub const SEA_FLOOR_COLOR: u32 = 0xc2b280; // sand

// Fog and background
pub const FOG_COLOR: u32 = 0x003366;
pub const FOG_NEAR: f32 = 10.0;
pub const FOG_FAR: f32 = 500.0;
pub const CLEAR_COLOR: u32 = 0x003366;

// Models
pub const VESSEL_NAME: &str = "vessel";
pub const VESSEL_PATH: &str = "./models/vessels/glTF/annanery.gltf";
pub const VESSEL_POSITION: Vec3 = Vec3::new(0.0, 2.0, -180.0);
pub const VESSEL_ROTATION: Vec3 = Vec3::new(0.0, -std::f32::consts::FRAC_PI_2, 0.0);
pub const TURRET_NAME: &str = "turret";
pub const TURRET_PATH: &str = "./models/turret/glTF/turret.glb";
pub const TURRET_POSITION: Vec3 = Vec3::new(0.0, -2.0, 0.0);
pub const TURRET_SCALE: f32 = 2.0;

/// Convert a 0xRRGGBB sRGB color to linear RGB in \[0, 1\].
#[inline]
pub fn hex_to_linear_rgb(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0)]
}
