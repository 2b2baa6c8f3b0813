#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visibility state of a patch.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "lowercase")]
pub enum PatchState {
    /// Work in progress, visible only to the owner.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "draft"))]
    Draft,
    /// Publicly listed.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "published"))]
    Published,
    /// Withdrawn from public listing without deleting it.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "hidden"))]
    Hidden,
}

impl PatchState {
    /// All possible state values.
    pub const ALL: &'static [PatchState] = &[Self::Draft, Self::Published, Self::Hidden];

    /// Returns the string representation (lowercase, as on the wire).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Hidden => "hidden",
        }
    }
}

impl fmt::Display for PatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for PatchState {
    fn default() -> Self {
        Self::Draft
    }
}

/// Error when parsing an invalid state string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStateError {
    invalid: String,
}

impl fmt::Display for ParseStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid state '{}'. Valid values: {}",
            self.invalid,
            PatchState::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseStateError {}

impl FromStr for PatchState {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "hidden" => Ok(Self::Hidden),
            _ => Err(ParseStateError {
                invalid: s.to_string(),
            }),
        }
    }
}
