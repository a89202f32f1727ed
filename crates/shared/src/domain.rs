use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

id_newtype!(CustomerId);
id_newtype!(PacketId);
id_newtype!(AccountId);

/// A numeric field as the service sends it.
///
/// Balances and rates are owned by the service. The client only echoes them,
/// so the value is kept in whatever JSON shape arrived (number or string) and
/// never used for arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(serde_json::Number),
    Text(String),
}

impl Default for Numeric {
    fn default() -> Self {
        Numeric::Text(String::new())
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Number(value) => f.pad(&value.to_string()),
            Numeric::Text(value) => f.pad(value),
        }
    }
}

impl Numeric {
    /// Integer value, whether it arrived as a number or as digits in a string.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Numeric::Number(value) => value.as_i64(),
            Numeric::Text(value) => value.trim().parse().ok(),
        }
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Number(value.into())
    }
}

/// Parses a date as the service formats it: either a bare `YYYY-MM-DD` or a
/// full RFC 3339 timestamp.
pub fn parse_service_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|timestamp| timestamp.date_naive())
}
