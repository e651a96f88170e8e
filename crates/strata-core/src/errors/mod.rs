//! Error handling for Strata.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod drive_error;
pub mod exit_code;
pub mod extract_error;
pub mod pipeline_error;
pub mod resolve_error;
pub mod store_error;
pub mod usage_error;

pub use drive_error::DriveError;
pub use extract_error::ExtractError;
pub use pipeline_error::PipelineError;
pub use resolve_error::ResolveError;
pub use store_error::StoreError;
pub use usage_error::UsageError;
