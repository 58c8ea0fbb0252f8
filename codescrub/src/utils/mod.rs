// codescrub/src/utils/mod.rs
pub mod encoding;
pub mod files;
