//! 🧭 Okenaba core library.
//!
//! `okenaba-core` holds the wizard's data model and pure building blocks:
//! schema, committed snapshot, validation, preview rendering and upload
//! checks, plus config, logging and CLI definitions shared by the binaries.

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod preview;
pub mod schema;
pub mod share;
pub mod snapshot;
pub mod theme;
pub mod upload;
pub mod validation;

pub use schema::{FieldKey, Variant, WizardSchema};
pub use snapshot::{FieldValues, FormSnapshot};
pub use validation::{ValidationFailure, ValidationResult};
