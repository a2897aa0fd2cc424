//! Writers: saved JSON maps, generated C text and in-place source patches.
pub mod c;
pub mod json;
pub mod patch;
