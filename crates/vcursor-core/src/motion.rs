//! Stick-driven motion integrator.
//!
//! Velocity follows `dv/dt = a - k * v`, where `a` comes from the stick
//! through the acceleration curve and `k` is the drag coefficient. Each
//! frame takes one classical fourth-order Runge-Kutta step, so the cursor
//! approaches its terminal speed `a / k` smoothly at any frame rate. The
//! result is then snapped to zero below the minimum speed and capped at the
//! maximum speed.

use vcursor_types::config::CursorSettings;
use vcursor_types::curve::AccelerationCurve;
use vcursor_types::math::Vec2;

/// Per-frame integration parameters, already scaled by DPI and chosen for
/// the current hover state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    pub drag: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Use the stick acceleration directly as velocity.
    pub no_acceleration: bool,
}

impl MotionParams {
    /// Pick the hovered or default drag and speed cap and scale them by `dpi`.
    pub fn from_settings(settings: &CursorSettings, dpi: f32, hovering: bool) -> Self {
        let (drag, max_speed) = if hovering {
            (settings.drag_coefficient_hovered, settings.max_speed_hovered)
        } else {
            (settings.drag_coefficient, settings.max_speed)
        };
        Self {
            drag: drag * dpi,
            min_speed: settings.min_speed * dpi,
            max_speed: max_speed * dpi,
            no_acceleration: settings.no_acceleration,
        }
    }
}

/// Acceleration produced by a stick sample.
///
/// Zero inside the deadzone or without a curve. Otherwise the unit
/// direction is scaled by the curve value at the stick magnitude and by the
/// multiplier, with `dpi` applied to each of the two factors.
// FIXME: dpi ends up squared here. Tunables are calibrated against it, so
// changing it means retuning every curve.
pub fn stick_acceleration(
    stick: Vec2,
    curve: Option<&AccelerationCurve>,
    deadzone: f32,
    multiplier: f32,
    dpi: f32,
) -> Vec2 {
    let Some(curve) = curve else {
        return Vec2::ZERO;
    };
    let magnitude = stick.length();
    if magnitude <= deadzone {
        return Vec2::ZERO;
    }
    let direction = stick.safe_normal();
    let scaled_curve = curve.eval(magnitude) * dpi;
    let scaled_multiplier = multiplier * dpi;
    direction * scaled_curve * scaled_multiplier
}

/// One RK4 step of `dv/dt = accel - drag * v` over `dt`.
pub fn rk4_velocity(velocity: Vec2, accel: Vec2, drag: f32, dt: f32) -> Vec2 {
    let deriv = |v: Vec2| accel - v * drag;
    let k1 = deriv(velocity) * dt;
    let k2 = deriv(velocity + k1 * 0.5) * dt;
    let k3 = deriv(velocity + k2 * 0.5) * dt;
    let k4 = deriv(velocity + k3) * dt;
    velocity + (k1 + k2 * 2.0 + k3 * 2.0 + k4) / 6.0
}

/// Snap slow velocities to zero and cap fast ones at `max_speed`.
pub fn clamp_speed(velocity: Vec2, min_speed: f32, max_speed: f32) -> Vec2 {
    let speed_sq = velocity.length_squared();
    if speed_sq < min_speed * min_speed {
        Vec2::ZERO
    } else if speed_sq > max_speed * max_speed {
        velocity.safe_normal() * max_speed
    } else {
        velocity
    }
}

/// Advance `velocity` by one frame and apply the speed bounds.
pub fn integrate_velocity(velocity: Vec2, accel: Vec2, params: &MotionParams, dt: f32) -> Vec2 {
    let next = if params.no_acceleration {
        accel
    } else if !accel.is_zero() || !velocity.is_zero() {
        rk4_velocity(velocity, accel, params.drag, dt)
    } else {
        velocity
    };
    clamp_speed(next, params.min_speed, params.max_speed)
}
