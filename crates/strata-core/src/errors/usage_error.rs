//! Command-line usage errors, each carrying its distinct exit code.

use std::path::PathBuf;

use super::exit_code;

/// Invalid flag combination or missing required argument.
/// Always fatal before any extraction starts.
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    #[error("usage: [options] file...")]
    NoArguments,

    #[error("duplicate mode argument")]
    DuplicateMode,

    #[error("--stdout and -d options are not compatible")]
    StdoutAndOutputDir,

    #[error("a platform archive (-l) is mandatory for packaged-app inputs")]
    MissingPlatform,

    #[error("dependency folder {0} does not exist")]
    DepsFolderMissing(PathBuf),

    #[error("dependency folder {0} is not a directory")]
    DepsFolderNotDir(PathBuf),

    #[error("unrecognized option: {0}")]
    UnrecognizedOption(String),

    #[error("--stdout must be used with --dump")]
    StdoutWithoutDump,

    #[error("option {0} requires an argument")]
    MissingOptionArgument(String),
}

impl UsageError {
    /// The process exit code for this condition.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoArguments => exit_code::NO_ARGUMENTS,
            Self::DuplicateMode => exit_code::DUPLICATE_MODE,
            Self::StdoutAndOutputDir => exit_code::STDOUT_AND_OUTPUT_DIR,
            Self::MissingPlatform => exit_code::MISSING_PLATFORM,
            Self::DepsFolderMissing(_) => exit_code::DEPS_FOLDER_MISSING,
            Self::DepsFolderNotDir(_) => exit_code::DEPS_FOLDER_NOT_DIR,
            Self::UnrecognizedOption(_) => exit_code::UNRECOGNIZED_OPTION,
            Self::StdoutWithoutDump => exit_code::STDOUT_WITHOUT_DUMP,
            Self::MissingOptionArgument(_) => exit_code::MISSING_OPTION_ARGUMENT,
        }
    }
}
