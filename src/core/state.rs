use super::reactive::Pointer;
use super::scene::Scene;

// Application state shared by the event handlers and the frame tick.

/// The FX-enabled flag. Starts enabled; only the manual toggle flips it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FxState {
    enabled: bool,
}

impl Default for FxState {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl FxState {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Flip the flag and apply it to every gated layer. Returns the new value.
    pub fn toggle(&mut self, scene: &mut Scene) -> bool {
        self.enabled = !self.enabled;
        scene.set_fx_layers(self.enabled);
        self.enabled
    }
}

/// Load-time reduced-motion handling: hides the same layers as FX-off.
///
/// The flag itself is left alone, so a later manual toggle starts from
/// "enabled" regardless of the platform preference.
pub fn apply_reduced_motion(scene: &mut Scene, prefers_reduced: bool) -> bool {
    if prefers_reduced {
        scene.set_fx_layers(false);
    }
    prefers_reduced
}

/// What a `pagehide` means for the live session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageHide {
    /// Going into the back/forward cache; the page may come back as-is.
    Suspend,
    Unload,
}

impl PageHide {
    pub fn from_persisted(persisted: bool) -> Self {
        if persisted {
            PageHide::Suspend
        } else {
            PageHide::Unload
        }
    }

    pub fn ends_session(self) -> bool {
        self == PageHide::Unload
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AppState {
    /// Last pointer-move wins.
    pub pointer: Pointer,
    pub fx: FxState,
}
