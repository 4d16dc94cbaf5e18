//! Androos Player Core
//!
//! Platform-agnostic core types and error handling for Androos Player.
//!
//! This crate provides the building blocks shared by the player libraries:
//! - **Domain Types**: `AudioSessionId`, `EffectKind`
//! - **Error Handling**: Unified `PlayerError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use androos_core::{AudioSessionId, EffectKind};
//!
//! let session = AudioSessionId::new(42);
//! assert!(session.is_set());
//! assert!(!AudioSessionId::UNSET.is_set());
//!
//! assert_eq!(EffectKind::BassBoost.name(), "bass boost");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{PlayerError, Result};
pub use types::{AudioSessionId, EffectKind};
