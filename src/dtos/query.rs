//! Query DTOs - Data Transfer Objects per query string

use serde::{Deserialize, Deserializer, Serialize, de};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Query per le liste filtrabili per viaggio: ?trip=<uid>&page=&page_size=
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct TripFilterQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub trip: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page_size: Option<u32>,
}

/// Query di sola paginazione
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct PageQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page_size: Option<u32>,
}

// `?trip=` vuoto equivale a nessun filtro
fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => FromStr::from_str(s).map_err(de::Error::custom).map(Some),
    }
}
