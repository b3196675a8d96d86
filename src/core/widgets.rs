// String and number helpers behind the DOM microinteractions.

pub const TILT_MAX_DEG: f64 = 10.0;
pub const TILT_LIFT_PX: f64 = 2.0;
pub const WHEEL_TO_HORIZONTAL: f64 = 0.9;
pub const DEFAULT_CARD_HUE: f64 = 330.0;
pub const TINT_CLEAR_MS: i32 = 400;

/// Horizontal scroll delta for a wheel event, or `None` when the gesture
/// is mostly horizontal and should be left to the browser.
#[inline]
pub fn wheel_remap(delta_x: f64, delta_y: f64) -> Option<f64> {
    (delta_y.abs() > delta_x.abs()).then(|| delta_y * WHEEL_TO_HORIZONTAL)
}

/// Sub-pixel remainder of remapped wheel deltas. `scrollLeft` only takes
/// whole pixels, so small trackpad deltas are banked until they add up.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollCarry {
    remainder: f64,
}

impl ScrollCarry {
    /// Whole pixels to scroll now for a delta of `dx`.
    pub fn take(&mut self, dx: f64) -> i32 {
        let total = self.remainder + dx;
        let whole = total.trunc();
        self.remainder = total - whole;
        whole as i32
    }
}

/// Cursor offset from an element's center, each axis in [-0.5, 0.5].
#[inline]
pub fn tilt_offset(client_x: f64, client_y: f64, left: f64, top: f64, width: f64, height: f64) -> (f64, f64) {
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }
    let x = ((client_x - left) / width - 0.5).clamp(-0.5, 0.5);
    let y = ((client_y - top) / height - 0.5).clamp(-0.5, 0.5);
    (x, y)
}

/// CSS transform for a card tilted toward the cursor.
pub fn tilt_transform(x: f64, y: f64) -> String {
    format!(
        "rotateX({}deg) rotateY({}deg) translateY(-{}px)",
        -y * TILT_MAX_DEG,
        x * TILT_MAX_DEG,
        TILT_LIFT_PX
    )
}

/// `data-hue` value, falling back to the default card hue.
pub fn card_hue(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|h| h.is_finite())
        .unwrap_or(DEFAULT_CARD_HUE)
}

pub fn accent_color(hue: f64) -> String {
    format!("hsl({},100%,55%)", hue)
}

pub fn accent_shadow(hue: f64) -> String {
    format!("0 10px 30px hsla({},100%,55%,.18)", hue)
}

pub fn fx_label(enabled: bool) -> &'static str {
    if enabled {
        "FX: ON"
    } else {
        "FX: OFF"
    }
}

/// Navigation target selector: `href` wins over `data-go` unless the
/// element is a call-to-action button, which always uses `data-go`.
pub fn nav_target<'a>(href: Option<&'a str>, data_go: Option<&'a str>, is_cta: bool) -> Option<&'a str> {
    let present = |v: Option<&'a str>| v.map(str::trim).filter(|s| !s.is_empty());
    if is_cta {
        present(data_go)
    } else {
        present(href).or_else(|| present(data_go))
    }
}
