// Airport payload carried by every vertex of the route graph

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CODE_LEN: usize = 3;
pub const MAX_CITY_LEN: usize = 24;
pub const MAX_NAME_LEN: usize = 64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AirportError {
    #[error("Airport code must be exactly 3 characters, got {0:?}")]
    InvalidCode(String),

    #[error("City name longer than 24 characters: {0:?}")]
    CityTooLong(String),

    #[error("Airport name longer than 64 characters: {0:?}")]
    NameTooLong(String),
}

// Field widths follow the fixed record shape: 3 char code, city <= 24, name <= 64.
// `Clone` is the field-complete copy used whenever a payload leaves the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub id: i32,
    pub code: String,
    pub city: String,
    pub name: String,
    pub utc_offset: i8,
}

impl Airport {
    pub fn new(
        id: i32,
        code: &str,
        city: &str,
        name: &str,
        utc_offset: i8,
    ) -> Result<Self, AirportError> {
        let airport = Self {
            id,
            code: code.to_string(),
            city: city.to_string(),
            name: name.to_string(),
            utc_offset,
        };
        airport.validate()?;
        Ok(airport)
    }

    // Lengths are counted in chars, not bytes ("Cancún" is six characters).
    pub fn validate(&self) -> Result<(), AirportError> {
        if self.code.chars().count() != CODE_LEN {
            return Err(AirportError::InvalidCode(self.code.clone()));
        }
        if self.city.chars().count() > MAX_CITY_LEN {
            return Err(AirportError::CityTooLong(self.city.clone()));
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(AirportError::NameTooLong(self.name.clone()));
        }
        Ok(())
    }
}

// Listing form: `[MEX] Ciudad de México`
impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_airport_keeps_every_field() {
        let airport = Airport::new(
            500,
            "CUN",
            "Cancún",
            "Aeropuerto Internacional de Cancún",
            -5,
        )
        .unwrap();

        let copy = airport.clone();
        assert_eq!(copy.id, 500);
        assert_eq!(copy.code, "CUN");
        assert_eq!(copy.city, "Cancún");
        assert_eq!(copy.name, "Aeropuerto Internacional de Cancún");
        assert_eq!(copy.utc_offset, -5);
        assert_eq!(copy, airport);
        assert_eq!(airport.to_string(), "[CUN] Cancún");
    }

    #[test]
    fn test_field_widths_are_enforced() {
        assert_eq!(
            Airport::new(1, "MEXX", "Ciudad", "Name", -6),
            Err(AirportError::InvalidCode("MEXX".to_string()))
        );
        assert!(matches!(
            Airport::new(1, "MX", "Ciudad", "Name", -6),
            Err(AirportError::InvalidCode(_))
        ));

        let long_city = "c".repeat(MAX_CITY_LEN + 1);
        assert!(matches!(
            Airport::new(1, "MEX", &long_city, "Name", -6),
            Err(AirportError::CityTooLong(_))
        ));

        let long_name = "n".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            Airport::new(1, "MEX", "Ciudad", &long_name, -6),
            Err(AirportError::NameTooLong(_))
        ));

        // exactly at the limit is fine
        let city = "é".repeat(MAX_CITY_LEN);
        assert!(Airport::new(1, "MEX", &city, "Name", -6).is_ok());
    }
}
