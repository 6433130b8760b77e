//! DNSPod returns ids and counters either as JSON numbers or as strings
//! depending on the action (`Domain.List` ids are numbers, `Record.List` ids
//! are strings, `ttl` is always a string). These helpers accept both.

use serde::{Deserialize, Deserializer, de::Error};

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Str(String),
    Int(i64),
    Float(f64),
}

impl Loose {
    fn into_string(self) -> String {
        match self {
            Self::Str(s) => s,
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
        }
    }
}

/// Decode a number or string into `String`.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Loose::deserialize(deserializer).map(Loose::into_string)
}

/// Decode a number, string, `null` or `""` into `Option<String>`.
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Loose>::deserialize(deserializer)?
        .map(Loose::into_string)
        .filter(|s| !s.is_empty()))
}

/// Decode a number or numeric string into `u32`.
pub fn u32_lenient<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = string_or_number(deserializer)?;
    raw.trim()
        .parse()
        .map_err(|_| D::Error::custom(format!("expected unsigned integer, got '{raw}'")))
}

/// Decode an optional counter; missing, `null` and `""` become `None`.
pub fn opt_u32_lenient<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    opt_string_or_number(deserializer)?
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("expected unsigned integer, got '{raw}'")))
        })
        .transpose()
}
