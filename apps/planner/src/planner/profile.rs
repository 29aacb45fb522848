//! User profile — the nine attributes collected by the form, validated once at the boundary.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const AGE_RANGE: RangeInclusive<u16> = 1..=120;
pub const HEIGHT_CM_RANGE: RangeInclusive<u16> = 100..=250;
pub const WEIGHT_KG_RANGE: RangeInclusive<u16> = 30..=200;

pub const DEFAULT_AGE: u16 = 25;
pub const DEFAULT_HEIGHT_CM: u16 = 170;
pub const DEFAULT_WEIGHT_KG: u16 = 65;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.label() == label)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Goal {
    #[default]
    #[serde(rename = "Weight Loss")]
    WeightLoss,
    #[serde(rename = "Muscle Gain")]
    MuscleGain,
    Maintenance,
    #[serde(rename = "General Fitness")]
    GeneralFitness,
}

impl Goal {
    pub const ALL: [Goal; 4] = [
        Goal::WeightLoss,
        Goal::MuscleGain,
        Goal::Maintenance,
        Goal::GeneralFitness,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Goal::WeightLoss => "Weight Loss",
            Goal::MuscleGain => "Muscle Gain",
            Goal::Maintenance => "Maintenance",
            Goal::GeneralFitness => "General Fitness",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.label() == label)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw submission as it arrives from the form or the JSON API.
///
/// Numbers are wide on purpose so out-of-range values reach `validate` and get a
/// readable message instead of a deserializer rejection.
#[derive(Debug, Deserialize)]
pub struct ProfileInput {
    pub gender: Gender,
    pub age: i64,
    #[serde(alias = "height")]
    pub height_cm: i64,
    #[serde(alias = "weight")]
    pub weight_kg: i64,
    pub goal: Goal,
    #[serde(default)]
    pub diet: String,
    #[serde(default)]
    pub dislikes: String,
    #[serde(default)]
    pub medical_conditions: String,
    #[serde(default)]
    pub supplements: String,
}

/// A validated profile. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    gender: Gender,
    age: u16,
    height_cm: u16,
    weight_kg: u16,
    goal: Goal,
    diet: String,
    dislikes: String,
    medical_conditions: String,
    supplements: String,
}

impl UserProfile {
    pub fn gender(&self) -> Gender {
        self.gender
    }
    pub fn age(&self) -> u16 {
        self.age
    }
    pub fn height_cm(&self) -> u16 {
        self.height_cm
    }
    pub fn weight_kg(&self) -> u16 {
        self.weight_kg
    }
    pub fn goal(&self) -> Goal {
        self.goal
    }
    pub fn diet(&self) -> &str {
        &self.diet
    }
    pub fn dislikes(&self) -> &str {
        &self.dislikes
    }
    pub fn medical_conditions(&self) -> &str {
        &self.medical_conditions
    }
    pub fn supplements(&self) -> &str {
        &self.supplements
    }
}

impl TryFrom<ProfileInput> for UserProfile {
    type Error = AppError;

    fn try_from(input: ProfileInput) -> Result<Self, Self::Error> {
        Ok(UserProfile {
            gender: input.gender,
            age: check_range("age", input.age, AGE_RANGE)?,
            height_cm: check_range("height_cm", input.height_cm, HEIGHT_CM_RANGE)?,
            weight_kg: check_range("weight_kg", input.weight_kg, WEIGHT_KG_RANGE)?,
            goal: input.goal,
            diet: input.diet,
            dislikes: input.dislikes,
            medical_conditions: input.medical_conditions,
            supplements: input.supplements,
        })
    }
}

fn check_range(field: &str, value: i64, range: RangeInclusive<u16>) -> Result<u16, AppError> {
    u16::try_from(value)
        .ok()
        .filter(|v| range.contains(v))
        .ok_or_else(|| {
            AppError::Validation(format!(
                "{field} must be between {} and {} (got {value})",
                range.start(),
                range.end()
            ))
        })
}
