//! Required-field checks shared by every write endpoint.
//!
//! Request bodies deserialize into all-optional DTOs so that a client which
//! leaves several fields out gets one answer naming all of them. A field counts
//! as missing when it is absent, an empty string, a zero id or a non-positive
//! amount. Any other id is passed on and the lookup decides whether it exists.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::str::FromStr;
use validator::Validate;

/// DTOs whose validation failures are reported as missing fields.
pub trait RequiredFields: Validate {
    /// `(struct field, wire name)` for every required field.
    const REQUIRED: &'static [(&'static str, &'static str)];
}

/// Wire name of each required field mapped to whether it was missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MissingFields(BTreeMap<&'static str, bool>);

impl MissingFields {
    pub fn any(&self) -> bool {
        self.0.values().any(|missing| *missing)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.0
            .iter()
            .filter(|(_, missing)| **missing)
            .map(|(name, _)| *name)
            .collect()
    }

    #[cfg(test)]
    pub fn is_missing(&self, wire_name: &str) -> bool {
        self.0.get(wire_name).copied().unwrap_or(false)
    }
}

pub fn missing_fields<T: RequiredFields>(req: &T) -> MissingFields {
    let failing: BTreeSet<String> = match req.validate() {
        Ok(()) => BTreeSet::new(),
        Err(errors) => errors.field_errors().keys().map(|k| k.to_string()).collect(),
    };

    MissingFields(
        T::REQUIRED
            .iter()
            .map(|(field, wire)| (*wire, failing.contains(*field) || failing.contains(*wire)))
            .collect(),
    )
}

/// Accepts `150` as well as `"150"`; blank strings read as absent.
pub fn flexible_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<N> {
        Number(N),
        Text(String),
    }

    match Option::<Raw<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Raw::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid number {text:?}: {e}"))),
    }
}

/// [`flexible_number`] for ids, where `0` also reads as absent.
pub fn flexible_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let id: Option<i64> = flexible_number(deserializer)?;
    Ok(id.filter(|id| *id != 0))
}
