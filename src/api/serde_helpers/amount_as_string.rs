use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serializer, de};

use super::{RawAmount, parse_amount};

pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawAmount::deserialize(deserializer)?;
    parse_amount(raw).map_err(de::Error::custom)
}
