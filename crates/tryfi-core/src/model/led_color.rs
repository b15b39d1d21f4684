// ── LED colour value object ──

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::convert::{as_int, field, opt_str_field};
use crate::error::CoreError;

/// One collar LED colour choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedColor {
    code: i64,
    hex: Option<String>,
    name: Option<String>,
}

impl LedColor {
    pub fn new(code: i64, hex: Option<String>, name: Option<String>) -> Self {
        Self { code, hex, name }
    }

    /// Parse `{ ledColorCode, hexCode, name }`. The code may arrive as a
    /// JSON integer or as numeric text.
    pub fn from_raw(raw: &Value) -> Result<Self, CoreError> {
        Ok(Self {
            code: as_int(field(raw, "ledColorCode")?, "ledColorCode")?,
            hex: opt_str_field(raw, "hexCode")?,
            name: opt_str_field(raw, "name")?,
        })
    }

    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn hex(&self) -> Option<&str> {
        self.hex.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Display for LedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Color: {} Hex Code: {} Color Code: {}",
            self.name.as_deref().unwrap_or("-"),
            self.hex.as_deref().unwrap_or("-"),
            self.code
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_string_code() {
        let c = LedColor::from_raw(&json!({ "ledColorCode": "3", "hexCode": "#00FF00", "name": "Green" }))
            .unwrap();
        assert_eq!(c.code(), 3);
        assert_eq!(c.hex(), Some("#00FF00"));
        assert_eq!(c.to_string(), "Color: Green Hex Code: #00FF00 Color Code: 3");
    }

    #[test]
    fn missing_code_is_an_error() {
        let err = LedColor::from_raw(&json!({ "name": "Blue" })).unwrap_err();
        assert!(err.is_missing_field());
    }
}
