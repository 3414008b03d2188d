//! EIP-55 checksummed address strings.

use std::str::FromStr;

use alloy_primitives::Address;
use serde::{Deserialize, Deserializer, Serializer, de};

pub fn serialize<S>(value: &Address, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_checksum(None))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Address, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Address::from_str(raw.trim())
        .map_err(|err| de::Error::custom(format!("invalid address `{raw}`: {err}")))
}

pub mod option {
    use std::str::FromStr;

    use alloy_primitives::Address;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(value: &Option<Address>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(inner) => serializer.serialize_str(&inner.to_checksum(None)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Address>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => Address::from_str(raw.trim())
                .map(Some)
                .map_err(|err| de::Error::custom(format!("invalid address `{raw}`: {err}"))),
            None => Ok(None),
        }
    }
}
