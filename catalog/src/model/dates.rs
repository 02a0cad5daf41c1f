// Filmoteka
// Copyright 2024 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Calendar dates on the wire, formatted as `YYYY-MM-DD`.
//!
//! Clients use several spellings for "no date": an absent field, a JSON `null`, an empty string
//! or the literal string `"null"`.  All of them are accepted on input.  On output, a missing
//! date is always a JSON `null`.

use filmoteka_core::model::{ModelError, ModelResult};
use time::macros::format_description;
use time::Date;

/// Parses an optional date from its textual representation `s`.
pub(crate) fn parse_date(s: &str) -> ModelResult<Option<Date>> {
    let s = s.trim();
    if s.is_empty() || s == "null" {
        return Ok(None);
    }
    Date::parse(s, format_description!("[year]-[month]-[day]"))
        .map(Some)
        .map_err(|e| ModelError(format!("Invalid date '{}': {}", s, e)))
}

/// Serde adapter for `Option<Date>` fields.  Use together with `#[serde(default)]`.
pub(crate) mod optional {
    use super::*;
    use serde::{de, ser, Deserialize, Deserializer, Serializer};

    /// Serializes `date` as a `YYYY-MM-DD` string or as `null`.
    pub(crate) fn serialize<S>(date: &Option<Date>, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => {
                let text = date
                    .format(format_description!("[year]-[month]-[day]"))
                    .map_err(ser::Error::custom)?;
                ser.serialize_str(&text)
            }
            None => ser.serialize_none(),
        }
    }

    /// Deserializes an optional date accepting all the spellings of "no date".
    pub(crate) fn deserialize<'de, D>(de: D) -> Result<Option<Date>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(de)? {
            Some(raw) => parse_date(&raw).map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use time::macros::date;

    #[derive(Debug, Deserialize, PartialEq, Serialize)]
    struct Holder {
        #[serde(with = "optional", default)]
        when: Option<Date>,
    }

    #[test]
    fn test_parse_date_ok() {
        assert_eq!(Ok(Some(date!(2023 - 12 - 31))), parse_date("2023-12-31"));
        assert_eq!(Ok(Some(date!(1905 - 01 - 02))), parse_date(" 1905-01-02 "));
    }

    #[test]
    fn test_parse_date_none() {
        assert_eq!(Ok(None), parse_date(""));
        assert_eq!(Ok(None), parse_date("null"));
    }

    #[test]
    fn test_parse_date_errors() {
        assert!(parse_date("2023-13-01").unwrap_err().0.contains("Invalid date '2023-13-01'"));
        assert!(parse_date("31/12/2023").unwrap_err().0.contains("Invalid date"));
        assert!(parse_date("2023-1-5").unwrap_err().0.contains("Invalid date"));
    }

    #[test]
    fn test_optional_deserialize_spellings() {
        for json in [r#"{}"#, r#"{"when": null}"#, r#"{"when": ""}"#, r#"{"when": "null"}"#] {
            let holder: Holder = serde_json::from_str(json).unwrap();
            assert_eq!(Holder { when: None }, holder, "Input was {}", json);
        }

        let holder: Holder = serde_json::from_str(r#"{"when": "2000-02-29"}"#).unwrap();
        assert_eq!(Holder { when: Some(date!(2000 - 02 - 29)) }, holder);
    }

    #[test]
    fn test_optional_deserialize_error() {
        let err = serde_json::from_str::<Holder>(r#"{"when": "2001-02-29"}"#).unwrap_err();
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_optional_serialize() {
        assert_eq!(
            r#"{"when":"0999-01-05"}"#,
            serde_json::to_string(&Holder { when: Some(date!(999 - 01 - 05)) }).unwrap()
        );
        assert_eq!(r#"{"when":null}"#, serde_json::to_string(&Holder { when: None }).unwrap());
    }
}
