//! Strongly-typed match concepts
//!
//! Sides, difficulty levels and shot parameters. Difficulty parsing is the
//! single place where raw configuration text becomes a typed value, so an
//! unknown level is rejected here rather than defaulted.

use crate::core::rink::{MAX_DIRECTION, MAX_SPEED, MIN_SPEED};
use crate::{CurlingError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which party is currently throwing
///
/// `A` is the human side, `B` is the computer side. `Invalid` is only
/// observed before a match is launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
    #[default]
    Invalid,
}

impl Side {
    /// The opposing side; `Invalid` has no opponent
    pub fn opponent(&self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
            Side::Invalid => Side::Invalid,
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Side::Invalid)
    }

    /// Is this side controlled by the human at the keyboard?
    pub fn is_human(&self) -> bool {
        matches!(self, Side::A)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
            Side::Invalid => write!(f, "-"),
        }
    }
}

/// Computer opponent strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CurlingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(CurlingError::UnsupportedDifficulty(s.to_string())),
        }
    }
}

/// Rotation imparted on release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Spin {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Spin {
    pub fn toggled(&self) -> Spin {
        match self {
            Spin::Clockwise => Spin::CounterClockwise,
            Spin::CounterClockwise => Spin::Clockwise,
        }
    }

    /// Lateral curl direction: clockwise stones drift toward +x
    pub fn curl_sign(&self) -> f64 {
        match self {
            Spin::Clockwise => 1.0,
            Spin::CounterClockwise => -1.0,
        }
    }
}

/// Committed aim, power and spin handed to the physics collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotParameters {
    /// Launch angle in radians, 0 is straight down the sheet, positive toward +x
    pub direction: f64,
    /// Release speed in m/s
    pub speed: f64,
    pub spin: Spin,
}

impl ShotParameters {
    pub fn new(direction: f64, speed: f64, spin: Spin) -> Self {
        ShotParameters {
            direction,
            speed,
            spin,
        }
    }

    /// Clamp direction and speed into the playable envelope
    pub fn clamped(self) -> Self {
        ShotParameters {
            direction: self.direction.clamp(-MAX_DIRECTION, MAX_DIRECTION),
            speed: self.speed.clamp(MIN_SPEED, MAX_SPEED),
            spin: self.spin,
        }
    }

    pub fn is_in_bounds(&self) -> bool {
        self.direction.is_finite()
            && self.speed.is_finite()
            && self.direction.abs() <= MAX_DIRECTION
            && (MIN_SPEED..=MAX_SPEED).contains(&self.speed)
    }
}

impl fmt::Display for ShotParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dir={:+.3}rad speed={:.2}m/s spin={:?}",
            self.direction, self.speed, self.spin
        )
    }
}
