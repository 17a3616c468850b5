//! Request and response models for the balance endpoints.

use serde::de::{Error as DeError, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Body of `POST /update-balance`.
///
/// Both fields accept a JSON integer or a string containing one, for
/// compatibility with loosely-typed clients. Fractional or non-numeric
/// values are rejected at deserialization.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBalanceRequest {
    /// Account identifier.
    #[serde(default, deserialize_with = "int_or_string")]
    pub user_id: Option<i64>,
    /// Signed delta applied to the current balance.
    #[serde(default, deserialize_with = "int_or_string")]
    pub amount: Option<i64>,
}

/// Balance returned by both endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceResponse {
    pub balance: i64,
}

/// Deserialize an `i64` from either a JSON integer or a string holding one.
fn int_or_string<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct IntOrString;

    impl<'de> Visitor<'de> for IntOrString {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E: DeError>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_u64<E: DeError>(self, v: u64) -> Result<Self::Value, E> {
            i64::try_from(v)
                .map(Some)
                .map_err(|_| E::custom("integer out of range"))
        }

        fn visit_str<E: DeError>(self, v: &str) -> Result<Self::Value, E> {
            v.trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| E::custom(format!("invalid integer: {v:?}")))
        }

        fn visit_unit<E: DeError>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(IntOrString)
}
