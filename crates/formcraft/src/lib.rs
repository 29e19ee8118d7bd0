//! `formcraft` - A local form builder
//!
//! Author forms made of typed fields, render them as standalone pages,
//! validate and store submissions, and export them as CSV.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod field;
pub mod form;
pub mod id;
pub mod logging;
pub mod render;
pub mod response;
pub mod storage;
pub mod styling;
pub mod submission;
pub mod validate;
pub mod viewer;

pub use builder::Builder;
pub use config::Config;
pub use error::{Error, Result};
pub use field::{create_default_field, Field, FieldType};
pub use form::Form;
pub use logging::init_logging;
pub use response::{FormResponse, ResponseValue};
pub use storage::{FormLibrary, ResponseStore, Storage};
pub use submission::{ResponseSink, SubmissionSession, SubmitOutcome};
pub use validate::validate_field;
