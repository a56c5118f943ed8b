// src/extractors/mod.rs
pub mod html;
pub mod profile;

// Re-export key extraction entry points for convenience
#[allow(unused_imports)]
pub use html::extract_from_html;
#[allow(unused_imports)]
pub use profile::{format_profile_summary, parse_profile_text};
