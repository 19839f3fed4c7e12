use std::path::PathBuf;

/// Fatal errors. Any of these ends the process with exit code 1.
/// Per-case problems never end up here; they become a `Verdict`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Config file '{filename}' does not exist (searched in current dir, its ancestors and {user_config_dir:?}).\n  Run `cfj --init` to create an example config.")]
    ConfigurationMissing {
        filename: &'static str,
        user_config_dir: Option<PathBuf>,
    },

    #[error("Invalid config TOML '{0}': {1}")]
    InvalidConfig(PathBuf, #[source] toml::de::Error),

    #[error("Source code '{0}' does not exist")]
    SourceNotFound(PathBuf),

    #[error("Unconfigured language for '{0}' (no entry in `[env.{1}]`)")]
    UnknownLanguage(PathBuf, String),

    #[error("Testcase file '{0}' does not exist")]
    TestFileNotFound(PathBuf),

    #[error(">>> Failed to compile the source code! ({0})")]
    CompileFailure(String),
}
