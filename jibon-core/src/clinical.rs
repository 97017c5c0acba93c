//! Clinical submission types and boundary validation
//!
//! [`ClinicalInput`] carries the eleven values a clinician submits for one
//! patient. The HTTP layer calls [`ClinicalInput::validate`] before anything
//! reaches the scoring engine or the ledger.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Patient gender as accepted by the scoring engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Lowercase wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    /// Parse case-insensitively, ignoring surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl TryFrom<String> for Gender {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("unknown gender: {value}"))
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The eleven clinical values of one submission, in scoring-engine order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalInput {
    /// Age in years
    pub age: i32,
    pub gender: Gender,
    /// Haemoglobin, g/dL
    pub hb: f64,
    /// Mean corpuscular volume, fL
    pub mcv: f64,
    /// Mean corpuscular haemoglobin, pg
    pub mch: f64,
    /// Red cell distribution width, %
    pub rdw: f64,
    /// Red blood cell count, 10^12/L
    pub rbc: f64,
    /// 0/1 flag
    pub fatigue: u8,
    /// Relation code of an affected family member, 0 = none
    #[serde(alias = "family_relation")]
    pub family_relation: i32,
    /// 0/1 flag
    pub jaundice: u8,
    /// Splenomegaly or cholelithiasis, 0/1 flag
    pub spleen: u8,
}

const AGE_RANGE: RangeInclusive<i32> = 0..=120;
const FAMILY_RELATION_RANGE: RangeInclusive<i32> = 0..=10;

/// Upper bounds for the lab values; each must also be strictly positive.
const HB_MAX: f64 = 25.0;
const MCV_MAX: f64 = 200.0;
const MCH_MAX: f64 = 80.0;
const RDW_MAX: f64 = 50.0;
const RBC_MAX: f64 = 15.0;

/// A submitted value the scoring engine must never see
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is out of range: {value} (expected {expected})")]
    OutOfRange {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            Self::OutOfRange { field, .. } | Self::NotFinite { field } => field,
        }
    }
}

impl ClinicalInput {
    /// Range-check every field
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_int("age", self.age, &AGE_RANGE, "0 to 120")?;
        check_lab("hb", self.hb, HB_MAX, "greater than 0, at most 25")?;
        check_lab("mcv", self.mcv, MCV_MAX, "greater than 0, at most 200")?;
        check_lab("mch", self.mch, MCH_MAX, "greater than 0, at most 80")?;
        check_lab("rdw", self.rdw, RDW_MAX, "greater than 0, at most 50")?;
        check_lab("rbc", self.rbc, RBC_MAX, "greater than 0, at most 15")?;
        check_flag("fatigue", self.fatigue)?;
        check_int(
            "familyRelation",
            self.family_relation,
            &FAMILY_RELATION_RANGE,
            "0 to 10",
        )?;
        check_flag("jaundice", self.jaundice)?;
        check_flag("spleen", self.spleen)?;
        Ok(())
    }

    /// Positional arguments for the scoring engine, in contract order
    pub fn to_args(&self) -> [String; 11] {
        [
            self.age.to_string(),
            self.gender.to_string(),
            self.hb.to_string(),
            self.mcv.to_string(),
            self.mch.to_string(),
            self.rdw.to_string(),
            self.rbc.to_string(),
            self.fatigue.to_string(),
            self.family_relation.to_string(),
            self.jaundice.to_string(),
            self.spleen.to_string(),
        ]
    }
}

fn check_int(
    field: &'static str,
    value: i32,
    range: &RangeInclusive<i32>,
    expected: &'static str,
) -> Result<(), ValidationError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value: value.to_string(),
            expected,
        })
    }
}

fn check_lab(
    field: &'static str,
    value: f64,
    max: f64,
    expected: &'static str,
) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value <= 0.0 || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value: value.to_string(),
            expected,
        });
    }
    Ok(())
}

fn check_flag(field: &'static str, value: u8) -> Result<(), ValidationError> {
    if value <= 1 {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value: value.to_string(),
            expected: "0 or 1",
        })
    }
}
