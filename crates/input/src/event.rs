use crate::InputError;

/// One digital movement axis: back/none/ahead or left/none/right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    Negative,
    #[default]
    Neutral,
    Positive,
}

impl Axis {
    pub fn value(self) -> f32 {
        match self {
            Axis::Negative => -1.0,
            Axis::Neutral => 0.0,
            Axis::Positive => 1.0,
        }
    }
}

impl TryFrom<i8> for Axis {
    type Error = InputError;

    fn try_from(v: i8) -> Result<Self, InputError> {
        match v {
            -1 => Ok(Axis::Negative),
            0 => Ok(Axis::Neutral),
            1 => Ok(Axis::Positive),
            other => Err(InputError::InvalidAxis(other)),
        }
    }
}

/// Input produced by the windowing layer.
///
/// The core consumes these events, never raw keyboard or mouse state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The drawable area changed size.
    Resize { width: u32, height: u32 },
    /// Look delta in input units (e.g. mouse counts).
    MoveDelta { d_pitch: f32, d_yaw: f32 },
    /// Held movement keys.
    DirectionalInput { forward: Axis, lateral: Axis },
}
