pub mod landing_page_stat;
pub mod patch;
pub mod patch_content;
pub mod patch_upvote;
pub mod profile;
pub mod user;
