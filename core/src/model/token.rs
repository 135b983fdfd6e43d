// Backoffice
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

//! The `AccessToken` data type.

use crate::model::{ModelError, ModelResult};
use serde::de::Visitor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque type representing the bearer token of the active session.
///
/// Tokens are minted by the server at login time and the client treats them as opaque
/// printable character sequences.
#[derive(Clone, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new access token from an untrusted string `s`, making sure it is valid.
    pub fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(ModelError("Invalid access token".to_owned()));
        }
        for ch in s.chars() {
            if !ch.is_ascii_graphic() {
                return Err(ModelError("Invalid access token".to_owned()));
            }
        }
        Ok(Self(s))
    }

    /// Returns the string representation of the token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("scrubbed access token")
    }
}

/// Visitor to deserialize an `AccessToken` from a string, validating it in the process.
struct AccessTokenVisitor;

impl Visitor<'_> for AccessTokenVisitor {
    type Value = AccessToken;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a non-empty string of printable ASCII characters")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        AccessToken::new(v).map_err(|e| E::custom(format!("{}", e)))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        AccessToken::new(v).map_err(|e| E::custom(format!("{}", e)))
    }
}

impl<'de> Deserialize<'de> for AccessToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_string(AccessTokenVisitor)
    }
}

#[cfg(any(test, feature = "testutils"))]
impl From<&'static str> for AccessToken {
    /// Creates a new access token from a hardcoded string, which must be valid.
    fn from(s: &'static str) -> Self {
        AccessToken::new(s).expect("Hardcoded tokens must be valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{Token, assert_de_tokens_error, assert_tokens};

    #[test]
    fn test_accesstoken_ser_de_ok() {
        let token = AccessToken::from("abc123");
        assert_tokens(&token, &[Token::String("abc123")]);
    }

    #[test]
    fn test_accesstoken_de_error() {
        assert_de_tokens_error::<AccessToken>(&[Token::String("")], "Invalid access token");
        assert_de_tokens_error::<AccessToken>(&[Token::String("abc def")], "Invalid access token");
    }

    #[test]
    fn test_accesstoken_ok() {
        let token = AccessToken::new("abc123.DEF-456_ghi").unwrap();
        assert_eq!("abc123.DEF-456_ghi", token.as_str());
    }

    #[test]
    fn test_accesstoken_error_empty() {
        AccessToken::new("").unwrap_err();
    }

    #[test]
    fn test_accesstoken_error_invalid_character() {
        AccessToken::new("abc def").unwrap_err();
        AccessToken::new("abc\ndef").unwrap_err();
        AccessToken::new("abc\u{00e9}def").unwrap_err();
    }

    #[test]
    fn test_accesstoken_debug_is_scrubbed() {
        let token = AccessToken::from("super-secret-token");
        assert_eq!("scrubbed access token", format!("{:?}", token));
    }
}
