//! # Sources
//!
//! Independent particle sources: a spatial, an angular and an energy
//! distribution plus a relative strength. Distributions are validated but
//! never normalized; the transport engine samples them as given.

use crate::error::ModelError;
use glam::DVec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpaceDistribution {
    Point { origin: DVec3 },
    /// Uniform over an axis-aligned box
    Box { lower: DVec3, upper: DVec3 },
}

impl SpaceDistribution {
    pub fn point(origin: impl Into<DVec3>) -> Self {
        Self::Point {
            origin: origin.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AngleDistribution {
    Isotropic,
    Monodirectional { direction: DVec3 },
}

/// Energy spectrum, energies in eV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnergyDistribution {
    /// Discrete lines with relative weights
    Discrete { energies: Vec<f64>, weights: Vec<f64> },
    /// Piecewise-linear continuous spectrum
    Tabular {
        energies: Vec<f64>,
        probabilities: Vec<f64>,
    },
    /// Muir fusion spectrum: mean energy `e0`, reactant mass ratio `m_rat`,
    /// ion temperature `kt`
    Muir { e0: f64, m_rat: f64, kt: f64 },
}

impl EnergyDistribution {
    /// A single 14 MeV D-T line.
    pub fn dt_line() -> Self {
        Self::Discrete {
            energies: vec![14.0e6],
            weights: vec![1.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub space: SpaceDistribution,
    pub angle: AngleDistribution,
    pub energy: EnergyDistribution,
    pub strength: f64,
}

impl Source {
    /// Sets the relative strength used when several sources are combined.
    pub fn with_strength(mut self, strength: f64) -> Result<Self, ModelError> {
        if !(strength.is_finite() && strength > 0.0) {
            return Err(ModelError::Distribution(format!(
                "source strength must be positive, got {strength}"
            )));
        }
        self.strength = strength;
        Ok(self)
    }
}

/// Validates the three distributions and builds a unit-strength source.
pub fn define_source(
    space: SpaceDistribution,
    angle: AngleDistribution,
    energy: EnergyDistribution,
) -> Result<Source, ModelError> {
    validate_space(&space)?;
    validate_angle(&angle)?;
    validate_energy(&energy)?;
    Ok(Source {
        space,
        angle,
        energy,
        strength: 1.0,
    })
}

fn distribution(message: impl Into<String>) -> ModelError {
    ModelError::Distribution(message.into())
}

fn validate_space(space: &SpaceDistribution) -> Result<(), ModelError> {
    match space {
        SpaceDistribution::Point { origin } if !origin.is_finite() => {
            Err(distribution("point source origin is not finite"))
        }
        SpaceDistribution::Box { lower, upper } => {
            if !(lower.is_finite() && upper.is_finite()) {
                Err(distribution("box source corners are not finite"))
            } else if lower.cmpgt(*upper).any() {
                Err(distribution("box source lower corner exceeds upper corner"))
            } else {
                Ok(())
            }
        }
        SpaceDistribution::Point { .. } => Ok(()),
    }
}

fn validate_angle(angle: &AngleDistribution) -> Result<(), ModelError> {
    match angle {
        AngleDistribution::Monodirectional { direction }
            if !direction.is_finite() || direction.length_squared() == 0.0 =>
        {
            Err(distribution("direction must be a finite non-zero vector"))
        }
        _ => Ok(()),
    }
}

fn validate_weights(what: &str, weights: &[f64]) -> Result<(), ModelError> {
    if weights.iter().any(|w| !(w.is_finite() && *w >= 0.0)) {
        return Err(distribution(format!("{what} must be non-negative and finite")));
    }
    if weights.iter().all(|w| *w == 0.0) {
        return Err(distribution(format!("{what} are all zero")));
    }
    Ok(())
}

fn validate_energy(energy: &EnergyDistribution) -> Result<(), ModelError> {
    match energy {
        EnergyDistribution::Discrete { energies, weights } => {
            if energies.is_empty() || energies.len() != weights.len() {
                return Err(distribution(format!(
                    "discrete spectrum needs matching energies and weights, got {} and {}",
                    energies.len(),
                    weights.len()
                )));
            }
            if energies.iter().any(|e| !(e.is_finite() && *e > 0.0)) {
                return Err(distribution("energies must be positive"));
            }
            validate_weights("weights", weights)
        }
        EnergyDistribution::Tabular {
            energies,
            probabilities,
        } => {
            if energies.len() < 2 || energies.len() != probabilities.len() {
                return Err(distribution(format!(
                    "tabular spectrum needs at least two matching points, got {} and {}",
                    energies.len(),
                    probabilities.len()
                )));
            }
            if energies.iter().any(|e| !(e.is_finite() && *e >= 0.0)) {
                return Err(distribution("energies must be non-negative"));
            }
            if energies.windows(2).any(|w| w[1] <= w[0]) {
                return Err(distribution("tabular energies must be strictly increasing"));
            }
            validate_weights("probabilities", probabilities)
        }
        EnergyDistribution::Muir { e0, m_rat, kt } => {
            if [e0, m_rat, kt].iter().all(|v| v.is_finite() && **v > 0.0) {
                Ok(())
            } else {
                Err(distribution("Muir parameters must be positive"))
            }
        }
    }
}
