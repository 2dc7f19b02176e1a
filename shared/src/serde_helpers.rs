//! Common serde helpers for request input
//!
//! 同一个字段既可能来自 JSON body (数字 / 字符串 / null)，也可能来自
//! query string (永远是字符串, `?state=` 为空串)。

use serde::Deserializer;
use serde::de::{self, Visitor};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Deserialize an optional value that treats null, absent and blank strings as `None`
///
/// Numbers and non-blank strings are parsed into `T`, so `?state=1` and
/// `{"state": 1}` produce the same value.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    deserializer.deserialize_any(BlankAsNone(PhantomData))
}

struct BlankAsNone<T>(PhantomData<T>);

impl<T> BlankAsNone<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn parse<E: de::Error>(value: &str) -> Result<Option<T>, E> {
        value.parse::<T>().map(Some).map_err(E::custom)
    }
}

impl<'de, T> Visitor<'de> for BlankAsNone<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Value = Option<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, a number or null")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        if value.trim().is_empty() {
            return Ok(None);
        }
        Self::parse(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Self::parse(&value.to_string())
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Self::parse(&value.to_string())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Filter {
        #[serde(default, deserialize_with = "blank_as_none")]
        name: Option<String>,
        #[serde(default, deserialize_with = "blank_as_none")]
        state: Option<i32>,
    }

    #[test]
    fn test_json_values() {
        let f: Filter = serde_json::from_str(r#"{"name": "go", "state": 1}"#).unwrap();
        assert_eq!(f.name.as_deref(), Some("go"));
        assert_eq!(f.state, Some(1));

        let f: Filter = serde_json::from_str(r#"{"name": "  ", "state": null}"#).unwrap();
        assert_eq!(f.name, None);
        assert_eq!(f.state, None);

        let f: Filter = serde_json::from_str("{}").unwrap();
        assert_eq!(f.name, None);
        assert_eq!(f.state, None);
    }

    #[test]
    fn test_numeric_strings_are_parsed() {
        let f: Filter = serde_json::from_str(r#"{"state": "0"}"#).unwrap();
        assert_eq!(f.state, Some(0));
        assert!(serde_json::from_str::<Filter>(r#"{"state": "abc"}"#).is_err());
    }
}
