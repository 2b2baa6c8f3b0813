#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of a content block inside a patch.
///
/// Wire names are the camelCase strings the content payload uses.
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
pub enum ContentBlockType {
    /// Plain text block, no images.
    #[serde(rename = "textField")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "textField"))]
    Text,
    /// Exactly one image.
    #[serde(rename = "singleImage")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "singleImage"))]
    SingleImage,
    /// One or more images.
    #[serde(rename = "imageGallery")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "imageGallery"))]
    ImageGallery,
}

impl ContentBlockType {
    /// All possible block types.
    pub const ALL: &'static [ContentBlockType] =
        &[Self::Text, Self::SingleImage, Self::ImageGallery];

    /// Returns the wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "textField",
            Self::SingleImage => "singleImage",
            Self::ImageGallery => "imageGallery",
        }
    }
}

impl fmt::Display for ContentBlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for ContentBlockType {
    fn default() -> Self {
        Self::Text
    }
}

/// Error when parsing an invalid block type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBlockTypeError {
    invalid: String,
}

impl fmt::Display for ParseBlockTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid block type '{}'. Valid values: {}",
            self.invalid,
            ContentBlockType::ALL
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseBlockTypeError {}

impl FromStr for ContentBlockType {
    type Err = ParseBlockTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "textField" => Ok(Self::Text),
            "singleImage" => Ok(Self::SingleImage),
            "imageGallery" => Ok(Self::ImageGallery),
            _ => Err(ParseBlockTypeError {
                invalid: s.to_string(),
            }),
        }
    }
}

/// Violation of the block-type/image-count rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BlockRuleError {
    #[error("single image type allows only one image")]
    TooManyImages,
    #[error("image type requires at least one image")]
    MissingImage,
    #[error("text type cannot have images")]
    UnexpectedImages,
}

/// Validate the image list of a content block against its type.
///
/// Rules are checked in priority order; the first violation wins:
/// 1. `singleImage` with more than one image,
/// 2. `singleImage` or `imageGallery` with no image at all,
/// 3. `textField` with any image.
///
/// Pure check with no side effects, used both when creating and when
/// updating a block.
pub fn validate_images(
    block_type: ContentBlockType,
    images: &[String],
) -> Result<(), BlockRuleError> {
    if block_type == ContentBlockType::SingleImage && images.len() > 1 {
        return Err(BlockRuleError::TooManyImages);
    }
    if matches!(
        block_type,
        ContentBlockType::SingleImage | ContentBlockType::ImageGallery
    ) && images.is_empty()
    {
        return Err(BlockRuleError::MissingImage);
    }
    if block_type == ContentBlockType::Text && !images.is_empty() {
        return Err(BlockRuleError::UnexpectedImages);
    }
    Ok(())
}
