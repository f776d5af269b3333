use cubescene_scene::Node;
use serde::{Deserialize, Serialize};

use crate::{Axis, InputError, InputEvent};

/// Movement and look tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Distance moved per fixed update while an axis is held.
    pub move_speed: f32,
    /// Radians of rotation per input unit of look delta.
    pub look_sensitivity: f32,
    /// Pitch is clamped to +/- this many degrees.
    pub pitch_limit_degrees: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            move_speed: 0.1,
            look_sensitivity: 0.002,
            pitch_limit_degrees: 89.0,
        }
    }
}

impl ControlConfig {
    pub fn validate(&self) -> Result<(), InputError> {
        if !self.move_speed.is_finite() || self.move_speed < 0.0 {
            return Err(InputError::InvalidControl(format!(
                "move_speed {} must be a non-negative number",
                self.move_speed
            )));
        }
        if !self.look_sensitivity.is_finite() {
            return Err(InputError::InvalidControl(format!(
                "look_sensitivity {} must be finite",
                self.look_sensitivity
            )));
        }
        if !(self.pitch_limit_degrees > 0.0 && self.pitch_limit_degrees < 90.0) {
            return Err(InputError::InvalidControl(format!(
                "pitch_limit_degrees {} must be in (0, 90)",
                self.pitch_limit_degrees
            )));
        }
        Ok(())
    }
}

/// Input accumulated between fixed updates.
///
/// Held axes persist until the next directional event; look deltas
/// accumulate until a fixed update consumes them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    forward: Axis,
    lateral: Axis,
    pending_pitch: f32,
    pending_yaw: f32,
    pending_resize: Option<(u32, u32)>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.pending_resize = Some((width, height));
    }

    pub fn on_move_delta(&mut self, d_pitch: f32, d_yaw: f32) -> Result<(), InputError> {
        if !d_pitch.is_finite() || !d_yaw.is_finite() {
            return Err(InputError::NonFiniteDelta { d_pitch, d_yaw });
        }
        self.pending_pitch += d_pitch;
        self.pending_yaw += d_yaw;
        Ok(())
    }

    /// Set held axes from raw `-1 | 0 | 1` values.
    pub fn on_directional_input(&mut self, forward: i8, lateral: i8) -> Result<(), InputError> {
        let forward = Axis::try_from(forward)?;
        let lateral = Axis::try_from(lateral)?;
        self.forward = forward;
        self.lateral = lateral;
        Ok(())
    }

    pub fn apply(&mut self, event: InputEvent) -> Result<(), InputError> {
        match event {
            InputEvent::Resize { width, height } => self.on_resize(width, height),
            InputEvent::MoveDelta { d_pitch, d_yaw } => self.on_move_delta(d_pitch, d_yaw)?,
            InputEvent::DirectionalInput { forward, lateral } => {
                self.forward = forward;
                self.lateral = lateral;
            }
        }
        Ok(())
    }

    pub fn axes(&self) -> (Axis, Axis) {
        (self.forward, self.lateral)
    }

    /// Take the accumulated look delta, resetting it to zero.
    pub fn take_look_delta(&mut self) -> (f32, f32) {
        let delta = (self.pending_pitch, self.pending_yaw);
        self.pending_pitch = 0.0;
        self.pending_yaw = 0.0;
        delta
    }

    /// Take the most recent resize, if one arrived since the last call.
    pub fn take_resize(&mut self) -> Option<(u32, u32)> {
        self.pending_resize.take()
    }
}

/// Integrates accumulated input into the player node.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerController {
    config: ControlConfig,
}

impl PlayerController {
    pub fn new(config: ControlConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// Run one fixed update. `dt` is measured in fixed updates, so a normal
    /// tick passes `1.0` and moves the player `move_speed` along each held
    /// axis.
    pub fn fixed_update(&self, input: &mut InputState, player: &mut Node, dt: f32) {
        let (d_pitch, d_yaw) = input.take_look_delta();
        if d_pitch != 0.0 || d_yaw != 0.0 {
            let s = self.config.look_sensitivity;
            player.rotate(d_pitch * s, d_yaw * s);
            let limit = self.config.pitch_limit_degrees.to_radians();
            player.rotation.x = player.rotation.x.clamp(-limit, limit);
        }

        let (forward, lateral) = input.axes();
        if forward != Axis::Neutral || lateral != Axis::Neutral {
            let direction = player.forward() * forward.value() + player.right() * lateral.value();
            player.translate(direction * (self.config.move_speed * dt));
        }

        tracing::trace!(
            x = player.position.x,
            y = player.position.y,
            z = player.position.z,
            pitch = player.pitch(),
            yaw = player.yaw(),
            "fixed update"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubescene_math::Vector3;

    fn approx_vec(a: Vector3, b: Vector3) -> bool {
        (a - b).magnitude() < 1e-6
    }

    fn origin_player() -> Node {
        Node::player(Vector3::empty(), Vector3::empty())
    }

    #[test]
    fn control_config_defaults_are_valid() {
        assert!(ControlConfig::default().validate().is_ok());
        let bad = ControlConfig {
            pitch_limit_degrees: 90.0,
            ..ControlConfig::default()
        };
        assert!(bad.validate().is_err());
        let bad = ControlConfig {
            move_speed: -1.0,
            ..ControlConfig::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn forward_tick_moves_by_move_speed() {
        let controller = PlayerController::default();
        let mut input = InputState::new();
        let mut player = origin_player();
        let expected = player.forward() * controller.config().move_speed;

        input.on_directional_input(1, 0).unwrap();
        controller.fixed_update(&mut input, &mut player, 1.0);
        assert!(approx_vec(player.position, expected), "{:?}", player.position);
    }

    #[test]
    fn lateral_moves_along_right() {
        let controller = PlayerController::default();
        let mut input = InputState::new();
        let mut player = origin_player();
        input.on_directional_input(0, 1).unwrap();
        controller.fixed_update(&mut input, &mut player, 2.0);
        let expected = player.right() * 0.2;
        assert!(approx_vec(player.position, expected));
    }

    #[test]
    fn held_axes_persist_across_ticks() {
        let controller = PlayerController::default();
        let mut input = InputState::new();
        let mut player = origin_player();
        input.on_directional_input(-1, 0).unwrap();
        for _ in 0..3 {
            controller.fixed_update(&mut input, &mut player, 1.0);
        }
        assert!(approx_vec(player.position, Vector3::new(0.0, 0.0, -0.3)));

        input.on_directional_input(0, 0).unwrap();
        controller.fixed_update(&mut input, &mut player, 1.0);
        assert!(approx_vec(player.position, Vector3::new(0.0, 0.0, -0.3)));
    }

    #[test]
    fn look_delta_is_scaled_and_consumed() {
        let controller = PlayerController::default();
        let mut input = InputState::new();
        let mut player = origin_player();
        input.on_move_delta(10.0, -50.0).unwrap();
        input.on_move_delta(5.0, 0.0).unwrap();
        controller.fixed_update(&mut input, &mut player, 1.0);
        assert!((player.pitch() - 0.03).abs() < 1e-6);
        assert!((player.yaw() + 0.1).abs() < 1e-6);
        assert_eq!(input.take_look_delta(), (0.0, 0.0));
    }

    #[test]
    fn pitch_is_clamped() {
        let controller = PlayerController::default();
        let mut input = InputState::new();
        let mut player = origin_player();
        input.on_move_delta(1.0e6, 0.0).unwrap();
        controller.fixed_update(&mut input, &mut player, 1.0);
        assert!((player.pitch() - 89f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn invalid_input_is_rejected() {
        let mut input = InputState::new();
        assert!(matches!(
            input.on_directional_input(3, 0),
            Err(InputError::InvalidAxis(3))
        ));
        assert_eq!(input.axes(), (Axis::Neutral, Axis::Neutral));
        assert!(input.on_move_delta(f32::NAN, 0.0).is_err());
        assert_eq!(input.take_look_delta(), (0.0, 0.0));
    }

    #[test]
    fn apply_events() {
        let mut input = InputState::new();
        input
            .apply(InputEvent::DirectionalInput {
                forward: Axis::Positive,
                lateral: Axis::Negative,
            })
            .unwrap();
        input.apply(InputEvent::Resize { width: 1, height: 2 }).unwrap();
        input
            .apply(InputEvent::MoveDelta {
                d_pitch: 1.0,
                d_yaw: 2.0,
            })
            .unwrap();
        assert_eq!(input.axes(), (Axis::Positive, Axis::Negative));
        assert_eq!(input.take_resize(), Some((1, 2)));
        assert_eq!(input.take_resize(), None);
        assert_eq!(input.take_look_delta(), (1.0, 2.0));
    }
}
