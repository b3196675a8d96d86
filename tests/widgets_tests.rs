// Host-side tests for the DOM microinteraction helpers and page constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core {
    pub mod color {
        include!("../src/core/color.rs");
    }
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod widgets {
        include!("../src/core/widgets.rs");
    }
}

use crate::core::color::{hex_rgb, hsl_rgb};
use crate::core::constants::*;
use crate::core::widgets::*;

#[test]
fn vertical_wheel_becomes_horizontal_scroll() {
    assert_eq!(wheel_remap(10.0, 100.0), Some(90.0));
    assert_eq!(wheel_remap(-5.0, -40.0), Some(-36.0));
    // mostly horizontal gestures are left to the browser
    assert_eq!(wheel_remap(100.0, 10.0), None);
    assert_eq!(wheel_remap(30.0, 30.0), None);
}

#[test]
fn small_wheel_deltas_accumulate_into_whole_pixels() {
    let mut carry = ScrollCarry::default();
    let dx = wheel_remap(0.0, 0.4).expect("vertical");
    assert!((dx - 0.36).abs() < 1e-9);
    assert_eq!(carry.take(dx), 0);
    assert_eq!(carry.take(dx), 0);
    assert_eq!(carry.take(dx), 1);

    let mut back = ScrollCarry::default();
    assert_eq!(back.take(-0.6), 0);
    assert_eq!(back.take(-0.6), -1);
    assert_eq!(back.take(90.0), 89);
}

#[test]
fn tilt_offset_is_centered_and_clamped() {
    assert_eq!(tilt_offset(150.0, 75.0, 100.0, 50.0, 100.0, 50.0), (0.0, 0.0));
    assert_eq!(tilt_offset(200.0, 100.0, 100.0, 50.0, 100.0, 50.0), (0.5, 0.5));
    assert_eq!(tilt_offset(0.0, 0.0, 100.0, 50.0, 100.0, 50.0), (-0.5, -0.5));
    assert_eq!(tilt_offset(10.0, 10.0, 0.0, 0.0, 0.0, 0.0), (0.0, 0.0));
}

#[test]
fn tilt_transform_leans_toward_cursor() {
    assert_eq!(
        tilt_transform(0.5, -0.5),
        "rotateX(5deg) rotateY(5deg) translateY(-2px)"
    );
    assert_eq!(
        tilt_transform(-0.25, 0.5),
        "rotateX(-5deg) rotateY(-2.5deg) translateY(-2px)"
    );
}

#[test]
fn card_hue_defaults() {
    assert_eq!(card_hue(None), DEFAULT_CARD_HUE);
    assert_eq!(card_hue(Some("200")), 200.0);
    assert_eq!(card_hue(Some(" 45.5 ")), 45.5);
    assert_eq!(card_hue(Some("teal")), 330.0);
    assert_eq!(card_hue(Some("NaN")), 330.0);
}

#[test]
fn accent_strings() {
    assert_eq!(accent_color(200.0), "hsl(200,100%,55%)");
    assert_eq!(accent_shadow(200.0), "0 10px 30px hsla(200,100%,55%,.18)");
    assert_eq!(accent_color(card_hue(None)), "hsl(330,100%,55%)");
}

#[test]
fn fx_labels() {
    assert_eq!(fx_label(true), "FX: ON");
    assert_eq!(fx_label(false), "FX: OFF");
}

#[test]
fn nav_target_prefers_href_except_for_cta() {
    assert_eq!(nav_target(Some("#about"), Some("#work"), false), Some("#about"));
    assert_eq!(nav_target(None, Some("#work"), false), Some("#work"));
    assert_eq!(nav_target(Some("#about"), Some("#work"), true), Some("#work"));
    assert_eq!(nav_target(Some("#about"), None, true), None);
    assert_eq!(nav_target(None, Some("   "), false), None);
    // an empty href falls through to data-go
    assert_eq!(nav_target(Some(""), Some("#work"), false), Some("#work"));
    assert_eq!(nav_target(Some("  "), Some("#work"), false), Some("#work"));
    assert_eq!(nav_target(Some(""), None, false), None);
}

#[test]
fn hex_and_hsl_colors() {
    assert_eq!(hex_rgb(0xff0000), glam::Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(hex_rgb(0x000000), glam::Vec3::ZERO);
    let c = hex_rgb(AMBIENT_COLOR);
    assert!((c.x - 0x40 as f32 / 255.0).abs() < 1e-6);

    let blue = hsl_rgb(240.0, 1.0, 0.5);
    assert!((blue - glam::Vec3::new(0.0, 0.0, 1.0)).abs().max_element() < 1e-4);
    // hue wraps
    let a = hsl_rgb(30.0, 1.0, 0.5);
    let b = hsl_rgb(390.0, 1.0, 0.5);
    assert!((a - b).abs().max_element() < 1e-4);
    assert_eq!(hsl_rgb(123.0, 0.0, 0.3), glam::Vec3::splat(0.3));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(MAX_PIXEL_RATIO >= 1.0);
    assert!(CAMERA_NEAR > 0.0 && CAMERA_FAR > CAMERA_NEAR);
    assert!(PARALLAX_CAMERA_SMOOTHING > 0.0 && PARALLAX_CAMERA_SMOOTHING < 1.0);
    assert!(SPOT_A_SMOOTHING > 0.0 && SPOT_A_SMOOTHING < 1.0);
    assert!(SPOT_B_SMOOTHING > 0.0 && SPOT_B_SMOOTHING < 1.0);
    // spot B mirrors spot A
    assert!(SPOT_A_FOLLOW[0].signum() != SPOT_B_FOLLOW[0].signum());
    assert!(SPOT_A_FOLLOW[1].signum() != SPOT_B_FOLLOW[1].signum());
    assert!(PULSE_SCALE_FACTOR > 1.0);
    assert!(EMISSIVE_FLASH_PEAK > 0.0);
    assert!(SPIN_OVERRIDE_MAX > 0.0);
    assert_eq!(TINT_CLEAR_MS, 400);
}

#[test]
fn page_hooks() {
    use crate::constants::*;
    assert_eq!(CANVAS_SELECTOR, "#bg");
    assert_eq!(HSCROLL_ID, "vinylScroll");
    assert_eq!(FX_BUTTON_ID, "toggleFx");
    assert!(CTA_NAV_SELECTOR.ends_with(NAV_SELECTOR));
    assert!(CTA_NAV_SELECTOR.contains(CTA_CLASS));
    assert!((TINT_THRESHOLD - 0.6).abs() < f64::EPSILON);
}

#[test]
fn cancelled_events_are_not_registered_passive() {
    use crate::constants::PASSIVE_EVENTS;
    // nav links, the FX button and the wheel remap all call prevent_default
    for kind in ["click", "wheel", "submit", "keydown", "pagehide"] {
        assert!(!PASSIVE_EVENTS.contains(&kind), "{kind} registered passive");
    }
    assert!(PASSIVE_EVENTS.contains(&"scroll"));
    assert!(PASSIVE_EVENTS.contains(&"pointermove"));
}
