//! Closed-form delivery model shared by the simulated rink and the AI
//!
//! A delivered piece decelerates uniformly and drifts sideways in
//! proportion to the distance travelled, in the direction of its spin.

use crate::core::rink::{LOAD_POSITION_X, LOAD_POSITION_Z};
use crate::core::{ShotParameters, Spin};

/// Ice friction deceleration in m/s^2
pub const FRICTION_DECEL: f64 = 0.1;
/// Lateral drift per meter travelled
pub const CURL_RATE: f64 = 0.02;

/// Distance covered before the piece stops
pub fn travel_distance(speed: f64) -> f64 {
    speed * speed / (2.0 * FRICTION_DECEL)
}

/// Release speed needed to travel `distance` meters
pub fn speed_for_distance(distance: f64) -> f64 {
    (2.0 * FRICTION_DECEL * distance.max(0.0)).sqrt()
}

/// Where a delivery comes to rest if it touches nothing
pub fn resting_point(params: &ShotParameters) -> (f64, f64) {
    let travel = travel_distance(params.speed);
    let x = LOAD_POSITION_X
        + params.direction.sin() * travel
        + params.spin.curl_sign() * CURL_RATE * travel;
    let z = LOAD_POSITION_Z + params.direction.cos() * travel;
    (x, z)
}

/// Parameters that bring a delivery to rest at `(x, z)` with the given spin
///
/// The result is not clamped; callers decide what to do with targets
/// outside the shot envelope.
pub fn aim_at(x: f64, z: f64, spin: Spin) -> ShotParameters {
    let dz = (z - LOAD_POSITION_Z).max(0.0);
    let mut travel = (dz * dz + (x - LOAD_POSITION_X).powi(2)).sqrt();
    let mut direction = 0.0;
    // Two refinements converge well within a centimeter for on-sheet targets
    for _ in 0..2 {
        let lateral = x - LOAD_POSITION_X - spin.curl_sign() * CURL_RATE * travel;
        direction = lateral.atan2(dz);
        travel = if direction.cos().abs() > f64::EPSILON {
            dz / direction.cos()
        } else {
            travel
        };
    }
    ShotParameters::new(direction, speed_for_distance(travel), spin)
}
