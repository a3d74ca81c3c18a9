use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Length units a dimension can be entered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Unit {
    #[default]
    Feet,
    Inch,
    Meter,
    Centimeter,
}

impl Unit {
    pub const ALL: [Unit; 4] = [Unit::Feet, Unit::Inch, Unit::Meter, Unit::Centimeter];

    pub fn code(self) -> &'static str {
        match self {
            Unit::Feet => "ft",
            Unit::Inch => "inch",
            Unit::Meter => "m",
            Unit::Centimeter => "cm",
        }
    }

    /// Multiplier that converts a length in this unit to feet.
    pub fn feet_factor(self) -> f64 {
        match self {
            Unit::Feet => 1.0,
            Unit::Inch => 1.0 / 12.0,
            Unit::Meter => 3.28084,
            Unit::Centimeter => 0.0328084,
        }
    }

    pub fn to_feet(self, value: f64) -> f64 {
        value * self.feet_factor()
    }
}

/// Area in square feet of a `width` × `height` rectangle whose sides may be
/// measured in different units. No rounding is applied.
pub fn to_square_feet(width: f64, width_unit: Unit, height: f64, height_unit: Unit) -> f64 {
    width_unit.to_feet(width) * height_unit.to_feet(height)
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Unit::ALL
            .into_iter()
            .find(|unit| unit.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| Error::InvalidUnit(s.to_string()))
    }
}

impl TryFrom<String> for Unit {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.code().to_string()
    }
}
