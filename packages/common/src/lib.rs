pub mod storage;

mod content_block;
mod patch_state;

pub use content_block::{BlockRuleError, ContentBlockType, ParseBlockTypeError, validate_images};
pub use patch_state::{ParseStateError, PatchState};
