use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wave {
    Sin,
    Cos,
}

impl Wave {
    #[inline]
    pub fn eval(self, x: f32) -> f32 {
        match self {
            Wave::Sin => x.sin(),
            Wave::Cos => x.cos(),
        }
    }
}

/// Which transform channel an oscillation drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Position,
    Scale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
    /// All three components (uniform breathing on scale).
    All,
}

impl Axis {
    #[inline]
    fn mask(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
            Axis::All => Vec3::ONE,
        }
    }
}

/// `amplitude * wave(frequency * t + phase)` applied to one channel/axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillation {
    pub channel: Channel,
    pub axis: Axis,
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
    pub wave: Wave,
}

impl Oscillation {
    pub fn new(channel: Channel, axis: Axis, amplitude: f32, frequency: f32) -> Self {
        Self {
            channel,
            axis,
            amplitude,
            frequency,
            phase: 0.0,
            wave: Wave::Sin,
        }
    }

    pub fn phased(mut self, phase: f32, wave: Wave) -> Self {
        self.phase = phase;
        self.wave = wave;
        self
    }

    #[inline]
    pub fn offset(&self, t: f32) -> Vec3 {
        self.axis.mask() * (self.amplitude * self.wave.eval(self.frequency * t + self.phase))
    }
}

/// Declarative per-object motion: a fixed spin added every tick plus
/// closed-form oscillations around the rest pose.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MotionProfile {
    /// Radians added to the Euler rotation per tick.
    pub spin: Vec3,
    pub oscillations: SmallVec<[Oscillation; 3]>,
    /// When set, an installed spin override replaces `spin`.
    pub accepts_spin_override: bool,
}

impl MotionProfile {
    pub fn spinning(spin: Vec3) -> Self {
        Self {
            spin,
            ..Default::default()
        }
    }

    pub fn with(mut self, osc: Oscillation) -> Self {
        self.oscillations.push(osc);
        self
    }

    pub fn overridable(mut self) -> Self {
        self.accepts_spin_override = true;
        self
    }

    #[inline]
    pub fn effective_spin(&self, spin_override: Option<Vec3>) -> Vec3 {
        match spin_override {
            Some(s) if self.accepts_spin_override => s,
            _ => self.spin,
        }
    }

    /// Sum of oscillation offsets for `channel` at time `t`.
    pub fn channel_offset(&self, channel: Channel, t: f32) -> Vec3 {
        self.oscillations
            .iter()
            .filter(|o| o.channel == channel)
            .fold(Vec3::ZERO, |acc, o| acc + o.offset(t))
    }

    pub fn drives(&self, channel: Channel) -> bool {
        self.oscillations.iter().any(|o| o.channel == channel)
    }
}

/// Light intensity oscillation: `amplitude * wave(frequency * t + phase)`
/// on top of the light's baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightPulse {
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
    pub wave: Wave,
}

impl LightPulse {
    #[inline]
    pub fn intensity(&self, baseline: f32, t: f32) -> f32 {
        (baseline + self.amplitude * self.wave.eval(self.frequency * t + self.phase)).max(0.0)
    }
}
