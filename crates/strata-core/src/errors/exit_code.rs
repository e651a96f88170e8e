//! Process exit codes, one per usage condition.
//!
//! The numbering is part of the tool's contract with its launcher scripts;
//! codes are never reused for a different condition.

/// Invoked with no arguments, or help requested.
pub const NO_ARGUMENTS: i32 = 0;
/// A resolution-mode flag was given more than once.
pub const DUPLICATE_MODE: i32 = 1;
/// `--stdout` and `-d` are mutually exclusive.
pub const STDOUT_AND_OUTPUT_DIR: i32 = 2;
/// A packaged-app input was given without any platform archive.
pub const MISSING_PLATFORM: i32 = 3;
/// A `--deps` folder does not exist.
pub const DEPS_FOLDER_MISSING: i32 = 4;
/// A `--deps` folder is not a directory.
pub const DEPS_FOLDER_NOT_DIR: i32 = 5;
/// Unrecognized option.
pub const UNRECOGNIZED_OPTION: i32 = 6;
/// `--stdout` requires `--dump`.
pub const STDOUT_WITHOUT_DUMP: i32 = 7;
/// An option that requires an argument was given none.
pub const MISSING_OPTION_ARGUMENT: i32 = 9;
