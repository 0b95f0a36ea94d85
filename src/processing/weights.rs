//! Per-category scoring weights

use crate::error::{Result, RankerError};
use crate::processing::sections::SectionType;
use serde::{Deserialize, Serialize};

/// Accepted range for the sum of all four weights.
pub const WEIGHT_SUM_RANGE: (f32, f32) = (0.99, 1.01);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub skills: f32,
    pub education: f32,
    pub experience: f32,
    pub certifications: f32,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            skills: 0.4,
            education: 0.2,
            experience: 0.3,
            certifications: 0.1,
        }
    }
}

impl WeightVector {
    /// Build a weight vector, rejecting negative values and sums outside
    /// [`WEIGHT_SUM_RANGE`].
    pub fn new(skills: f32, education: f32, experience: f32, certifications: f32) -> Result<Self> {
        let weights = Self {
            skills,
            education,
            experience,
            certifications,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn sum(&self) -> f32 {
        self.skills + self.education + self.experience + self.certifications
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<()> {
        let values = [self.skills, self.education, self.experience, self.certifications];
        if values.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(RankerError::InvalidWeights(format!(
                "weights must be finite and non-negative, got {:?}",
                values
            )));
        }

        let sum = self.sum();
        let (low, high) = WEIGHT_SUM_RANGE;
        if !(low..=high).contains(&sum) {
            return Err(RankerError::InvalidWeights(format!(
                "weights must sum to 1.0 (±0.01), got {:.3}",
                sum
            )));
        }
        Ok(())
    }

    /// Weight for a section category. General text carries no weight.
    pub fn weight_for(&self, section: &SectionType) -> f32 {
        match section {
            SectionType::Skills => self.skills,
            SectionType::Education => self.education,
            SectionType::Experience => self.experience,
            SectionType::Certifications => self.certifications,
            SectionType::General => 0.0,
        }
    }

    /// Parse `skills,education,experience,certifications`, e.g. `0.4,0.2,0.3,0.1`.
    pub fn parse(input: &str) -> Result<Self> {
        let values = input
            .split(',')
            .map(|part| {
                part.trim().parse::<f32>().map_err(|e| {
                    RankerError::InvalidWeights(format!("'{}' is not a number: {}", part.trim(), e))
                })
            })
            .collect::<Result<Vec<f32>>>()?;

        match values.as_slice() {
            [skills, education, experience, certifications] => {
                Self::new(*skills, *education, *experience, *certifications)
            }
            _ => Err(RankerError::InvalidWeights(format!(
                "expected 4 comma-separated weights, got {}",
                values.len()
            ))),
        }
    }
}
