use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated weight/height pair, height already normalized to meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Body weight in kilograms
    pub weight_kg: f64,

    /// Standing height in meters
    pub height_m: f64,
}

impl Measurement {
    pub fn new(weight_kg: f64, height_m: f64) -> Self {
        Measurement { weight_kg, height_m }
    }
}

/// Fixed offset applied to the raw BMI depending on the selected mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SexAdjustment {
    #[default]
    None,
    Male,
    Female,
}

impl SexAdjustment {
    /// Offset added to the raw BMI
    pub fn offset(&self) -> f64 {
        match self {
            SexAdjustment::None => 0.0,
            SexAdjustment::Male => 0.5,
            SexAdjustment::Female => -0.5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SexAdjustment::None => "none",
            SexAdjustment::Male => "male",
            SexAdjustment::Female => "female",
        }
    }
}

impl fmt::Display for SexAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SexAdjustment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(SexAdjustment::None),
            "male" | "m" | "hombre" => Ok(SexAdjustment::Male),
            "female" | "f" | "mujer" => Ok(SexAdjustment::Female),
            _ => Err(format!("Invalid sex adjustment: {}", s)),
        }
    }
}

/// BMI category, ordered by ascending threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl Category {
    /// All categories in ascending order
    pub const ALL: [Category; 4] = [
        Category::Underweight,
        Category::Normal,
        Category::Overweight,
        Category::Obese,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Underweight => "Underweight",
            Category::Normal => "Normal",
            Category::Overweight => "Overweight",
            Category::Obese => "Obese",
        }
    }

    /// Display color as RGB components
    pub fn color_rgb(&self) -> (u8, u8, u8) {
        match self {
            Category::Underweight => (0x60, 0xa5, 0xfa),
            Category::Normal => (0x34, 0xd3, 0x99),
            Category::Overweight => (0xfb, 0xbf, 0x24),
            Category::Obese => (0xf8, 0x71, 0x71),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "underweight" => Ok(Category::Underweight),
            "normal" => Ok(Category::Normal),
            "overweight" => Ok(Category::Overweight),
            "obese" => Ok(Category::Obese),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// Result of a single computation, before it is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiOutcome {
    /// Raw BMI including the sex adjustment
    pub bmi: f64,

    /// BMI formatted to two decimal places
    pub bmi_display: String,

    pub category: Category,

    /// Marker position on the gauge, 0-100
    pub gauge_position: f64,
}

/// One entry in the computation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiRecord {
    /// Unique identifier for the record
    pub id: String,

    /// Weight exactly as entered
    pub weight_raw: String,

    /// Height exactly as entered
    pub height_raw: String,

    /// Adjustment mode used for this computation
    pub sex: SexAdjustment,

    /// BMI formatted to two decimal places
    pub bmi: String,

    pub category: Category,

    /// When the computation happened
    pub computed_at: DateTime<Utc>,
}

impl BmiRecord {
    /// BMI as a number for charting; non-finite text parses back to its float value
    pub fn bmi_value(&self) -> f64 {
        match self.bmi.as_str() {
            "Infinity" => f64::INFINITY,
            "-Infinity" => f64::NEG_INFINITY,
            other => other.parse().unwrap_or(f64::NAN),
        }
    }
}
