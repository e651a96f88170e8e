//! Argument parsing and validation.
//!
//! Every invalid invocation maps to a distinct `UsageError`, and through it
//! to a distinct process exit code, so wrapper scripts can tell the
//! conditions apart. An invalid `--cores` value is the one exception: it is
//! warned about and ignored, never fatal.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use lexopt::prelude::*;
use tracing::warn;

use strata_core::config::{ExtractionConfig, FactsSubset, OutputTarget, ResolutionMode};
use strata_core::errors::UsageError;

pub const USAGE: &str = "\
usage: strata [options] file...

  --full                 resolve the full transitive class set
  -i <file>              application input (snapshot or archive), repeatable
  -l <archive>           platform archive, repeatable
  -ld <archive>          dependency archive, repeatable
  --deps <dir>           add every .jar in <dir> as a dependency archive
  --app-glob <glob>      glob over qualified names selecting application classes
  -d <dir>               output directory for fact files
  --stdout               write facts to standard output (requires --dump)
  --cores <n>            worker pool width (default: all cores)
  --facts-subset <s>     app, app-n-deps, or platform
  --dump                 also emit a serialized representation dump
  --flow-sensitive       emit versioned variable facts
  --ordered-cg           deterministic single-threaded call-graph-ordered run
  --seed <file>          seed file of classes/methods to keep
  --sensitivity-methods <file>
                         per-method context-sensitivity records";

/// Parse one argument vector (without the program name) into a run
/// configuration.
pub fn parse(args: Vec<OsString>) -> Result<ExtractionConfig, UsageError> {
    if args.is_empty() {
        return Err(UsageError::NoArguments);
    }

    let mut config = ExtractionConfig::default();
    let mut out_dir: Option<PathBuf> = None;
    let mut stdout = false;
    let mut mode_set = false;

    let mut parser = lexopt::Parser::from_args(args);
    while let Some(arg) = parser.next().map_err(lexopt_error)? {
        match arg {
            Long("full") => {
                if mode_set {
                    return Err(UsageError::DuplicateMode);
                }
                config.mode = ResolutionMode::Full;
                mode_set = true;
            }
            Short('i') => config.inputs.push(path_value(&mut parser)?),
            Short('l') => match parser.optional_value() {
                // `-ld` is one flag, not a value attached to `-l`.
                Some(v) if v == "d" => config.dependencies.push(path_value(&mut parser)?),
                Some(v) => {
                    return Err(UsageError::UnrecognizedOption(format!(
                        "-l{}",
                        v.to_string_lossy()
                    )))
                }
                None => config.platforms.push(path_value(&mut parser)?),
            },
            Long("deps") => {
                let folder = path_value(&mut parser)?;
                config.dependencies.extend(expand_deps_folder(&folder)?);
            }
            Long("app-glob") => config.app_glob = string_value(&mut parser, "--app-glob")?,
            Short('d') => out_dir = Some(path_value(&mut parser)?),
            Long("stdout") => stdout = true,
            Long("cores") => {
                let raw = string_value(&mut parser, "--cores")?;
                match raw.parse::<usize>() {
                    Ok(n) if n > 0 => config.cores = Some(n),
                    _ => warn!(value = %raw, "invalid --cores value, using all cores"),
                }
            }
            Long("facts-subset") => {
                let raw = string_value(&mut parser, "--facts-subset")?;
                config.facts_subset = Some(match raw.to_ascii_uppercase().replace('-', "_").as_str() {
                    "APP" => FactsSubset::App,
                    "APP_N_DEPS" => FactsSubset::AppAndDeps,
                    "PLATFORM" => FactsSubset::Platform,
                    _ => {
                        return Err(UsageError::UnrecognizedOption(format!(
                            "--facts-subset {raw}"
                        )))
                    }
                });
            }
            Long("dump") => config.dump = true,
            Long("flow-sensitive") => config.flow_sensitive = true,
            Long("ordered-cg") => config.ordered_call_graph = true,
            Long("seed") => config.seed_file = Some(path_value(&mut parser)?),
            Long("sensitivity-methods") => {
                config.sensitivity_file = Some(path_value(&mut parser)?)
            }
            Value(v) => config.inputs.push(PathBuf::from(v)),
            Short(c) => return Err(UsageError::UnrecognizedOption(format!("-{c}"))),
            Long(name) => return Err(UsageError::UnrecognizedOption(format!("--{name}"))),
        }
    }

    if stdout && out_dir.is_some() {
        return Err(UsageError::StdoutAndOutputDir);
    }
    if stdout && !config.dump {
        return Err(UsageError::StdoutWithoutDump);
    }
    if has_packaged_app_input(&config.inputs) && config.platforms.is_empty() {
        return Err(UsageError::MissingPlatform);
    }

    // Dependencies stay a separate classpath section only when the subset
    // distinguishes them; otherwise they are ordinary library archives.
    if config.facts_subset != Some(FactsSubset::AppAndDeps) {
        let deps = std::mem::take(&mut config.dependencies);
        config.platforms.extend(deps);
    }

    config.output = if stdout {
        OutputTarget::Stdout
    } else {
        OutputTarget::Directory(out_dir.unwrap_or_else(|| PathBuf::from(".")))
    };
    Ok(config)
}

fn has_packaged_app_input(inputs: &[PathBuf]) -> bool {
    inputs
        .iter()
        .any(|p| p.extension().is_some_and(|e| e == "apk" || e == "aar"))
}

fn expand_deps_folder(folder: &Path) -> Result<Vec<PathBuf>, UsageError> {
    if !folder.exists() {
        return Err(UsageError::DepsFolderMissing(folder.to_path_buf()));
    }
    if !folder.is_dir() {
        return Err(UsageError::DepsFolderNotDir(folder.to_path_buf()));
    }
    let entries =
        fs::read_dir(folder).map_err(|_| UsageError::DepsFolderMissing(folder.to_path_buf()))?;
    let mut archives = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_some_and(|e| e == "jar") {
            archives.push(path);
        }
    }
    Ok(archives)
}

fn path_value(parser: &mut lexopt::Parser) -> Result<PathBuf, UsageError> {
    Ok(PathBuf::from(parser.value().map_err(lexopt_error)?))
}

fn string_value(parser: &mut lexopt::Parser, flag: &str) -> Result<String, UsageError> {
    parser
        .value()
        .map_err(lexopt_error)?
        .into_string()
        .map_err(|v| UsageError::UnrecognizedOption(format!("{flag} {}", v.to_string_lossy())))
}

fn lexopt_error(e: lexopt::Error) -> UsageError {
    match e {
        lexopt::Error::MissingValue { option } => {
            UsageError::MissingOptionArgument(option.unwrap_or_else(|| "<option>".to_string()))
        }
        other => UsageError::UnrecognizedOption(other.to_string()),
    }
}
