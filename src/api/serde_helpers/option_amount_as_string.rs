use alloy_primitives::U256;
use serde::Serializer;

pub fn serialize<S>(value: &Option<U256>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(inner) => serializer.serialize_str(&inner.to_string()),
        None => serializer.serialize_none(),
    }
}
