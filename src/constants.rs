/// Page wiring and presentation constants for the web front end.
///
/// Scene tuning lives in `mooring_core::constants`; this file only holds what
/// the browser layer needs (element ids, selectors, class toggles).
pub const CANVAS_ID: &str = "scene-canvas";

// Tone mapping
pub const TONEMAP_EXPOSURE: f32 = 1.0;

// Navigation buttons
pub const HOME_BUTTON: &str = ".homebutton";
pub const LEFT_BUTTON: &str = ".buttonleft";
pub const RIGHT_BUTTON: &str = ".buttonright";
pub const EDIT_BUTTON: &str = ".editbutton";

// Overlay toggle triggers
pub const CONTROLS_TRIGGERS: &[&str] = &[".toggle", ".gamepad"];
pub const TEXT_OVERLAY_TRIGGERS: &[&str] = &[".toggleoverlay"];
pub const LOGIN_TRIGGERS: &[&str] = &[".loginbutton", ".close-btn"];

// (selector, class) pairs flipped together by each trigger group
pub const CONTROLS_PANEL_TOGGLES: &[(&str, &str)] = &[
    (".controls", "current"),
    (".controlstext", "hidden"),
    (".gamepad", "hidden"),
    (".toggle", "hidden"),
    (".home", "shifthome"),
    (".login", "shiftlogin"),
    (".editmode", "shiftedit"),
];
pub const TEXT_OVERLAY_TOGGLES: &[(&str, &str)] = &[
    (".overlay", "minimise"),
    (".horizontal-group", "hidden"),
    (".textoverlay", "hidden"),
    (".mooring-image", "hidden"),
];
pub const LOGIN_TOGGLES: &[(&str, &str)] = &[
    (".login", "minimiselogin"),
    (".logincontainer", "hidden"),
    (".loginbutton", "hidden"),
];
