// Page hooks the backdrop binds to. Missing optional elements leave their
// feature inactive.

// Events whose handlers never cancel; registered passive. Everything else
// keeps the browser defaults so `prevent_default` takes effect.
pub const PASSIVE_EVENTS: [&str; 5] = ["scroll", "resize", "mousemove", "pointermove", "pointerleave"];

// Canvas the renderer draws into (required)
pub const CANVAS_SELECTOR: &str = "#bg";

// Navigation
pub const NAV_SELECTOR: &str = "[data-go]";
pub const CTA_NAV_SELECTOR: &str = ".cta[data-go]";
pub const NAV_ATTR: &str = "data-go";
pub const CTA_CLASS: &str = "cta";

// Horizontal scroll container (optional)
pub const HSCROLL_ID: &str = "vinylScroll";

// Tilt and tint
pub const TILT_SELECTOR: &str = ".tilt";
pub const TINT_SELECTOR: &str = ".card.tilt";
pub const TINT_HUE_KEY: &str = "hue"; // dataset key for data-hue
pub const TINT_THRESHOLD: f64 = 0.6;
pub const ACCENT_PROPERTY: &str = "--accent";

// FX toggle (optional)
pub const FX_BUTTON_ID: &str = "toggleFx";
pub const NOFX_CLASS: &str = "nofx";
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
