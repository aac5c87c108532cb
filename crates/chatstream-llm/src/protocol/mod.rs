//! Wire format types for provider-specific API protocols
//!
//! Each module contains pure serde structs matching the respective provider's
//! JSON API format. These types are only used at the vendor boundary.

pub mod anthropic;
pub mod gemini;
pub mod openai;
