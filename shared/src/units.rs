//! Unit conversion for body measurements
//!
//! Measurements are stored in SI units (kg, cm). Clients may submit
//! weight and height in other units; conversion happens at the API boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Weight Units
// ============================================================================

/// Weight unit accepted on input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
    Stone,
}

impl WeightUnit {
    /// Convert from this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => value * 0.453592,
            WeightUnit::Stone => value * 6.35029,
        }
    }

    /// Convert from kilograms to this unit
    pub fn from_kg(&self, kg: f64) -> f64 {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lbs => kg / 0.453592,
            WeightUnit::Stone => kg / 6.35029,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
            WeightUnit::Stone => "st",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kg" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "lbs" | "lb" | "pound" | "pounds" => Ok(WeightUnit::Lbs),
            "st" | "stone" | "stones" => Ok(WeightUnit::Stone),
            _ => Err(format!("Unknown weight unit: {}", s)),
        }
    }
}

// ============================================================================
// Height Units
// ============================================================================

/// Height unit accepted on input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    #[default]
    Cm,
    Meters,
    Inches,
}

impl HeightUnit {
    /// Convert from this unit to centimeters
    pub fn to_cm(&self, value: f64) -> f64 {
        match self {
            HeightUnit::Cm => value,
            HeightUnit::Meters => value * 100.0,
            HeightUnit::Inches => value * 2.54,
        }
    }

    /// Convert from centimeters to this unit
    pub fn from_cm(&self, cm: f64) -> f64 {
        match self {
            HeightUnit::Cm => cm,
            HeightUnit::Meters => cm / 100.0,
            HeightUnit::Inches => cm / 2.54,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            HeightUnit::Cm => "cm",
            HeightUnit::Meters => "m",
            HeightUnit::Inches => "in",
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for HeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" => Ok(HeightUnit::Cm),
            "m" | "meter" | "meters" => Ok(HeightUnit::Meters),
            "in" | "inch" | "inches" => Ok(HeightUnit::Inches),
            _ => Err(format!("Unknown height unit: {}", s)),
        }
    }
}

/// Parse an optional unit string, falling back to the default unit
pub fn parse_unit_or_default<U>(value: Option<&str>) -> Result<U, String>
where
    U: std::str::FromStr<Err = String> + Default,
{
    match value {
        Some(s) => s.parse(),
        None => Ok(U::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_weight_conversion_is_reversible(kg in 20.0f64..500.0) {
            for unit in [WeightUnit::Kg, WeightUnit::Lbs, WeightUnit::Stone] {
                let back = unit.to_kg(unit.from_kg(kg));
                prop_assert!((back - kg).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_height_conversion_is_reversible(cm in 50.0f64..300.0) {
            for unit in [HeightUnit::Cm, HeightUnit::Meters, HeightUnit::Inches] {
                let back = unit.to_cm(unit.from_cm(cm));
                prop_assert!((back - cm).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_known_conversions() {
        assert!((WeightUnit::Lbs.to_kg(154.0) - 69.85).abs() < 0.01);
        assert!((WeightUnit::Stone.to_kg(11.0) - 69.85).abs() < 0.01);
        assert!((HeightUnit::Inches.to_cm(69.0) - 175.26).abs() < 0.01);
        assert!((HeightUnit::Meters.to_cm(1.75) - 175.0).abs() < 1e-9);
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("LB".parse::<WeightUnit>().unwrap(), WeightUnit::Lbs);
        assert_eq!("stone".parse::<WeightUnit>().unwrap(), WeightUnit::Stone);
        assert_eq!("inches".parse::<HeightUnit>().unwrap(), HeightUnit::Inches);
        assert!("furlong".parse::<HeightUnit>().is_err());
    }

    #[test]
    fn test_parse_unit_or_default() {
        let unit: WeightUnit = parse_unit_or_default(None).unwrap();
        assert_eq!(unit, WeightUnit::Kg);
        let unit: HeightUnit = parse_unit_or_default(Some("m")).unwrap();
        assert_eq!(unit, HeightUnit::Meters);
        assert!(parse_unit_or_default::<WeightUnit>(Some("grams")).is_err());
    }
}
