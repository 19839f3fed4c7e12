use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use anyhow::Context as _;
use cfjudge_webclient::{codeforces, CodeforcesClient};
use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::error::Error;
use crate::testing::runner::TestCommand;

pub const APP_NAME: &str = "cfjudge";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,

    /// Testcase filename pattern, e.g. `#{contest}#{id}`
    pub pattern: String,

    /// Replacement for spaces in generated filenames
    #[serde(default = "Config::default_replace_space")]
    pub replace_space: String,

    /// Suffix of testcase files, e.g. `.xml`
    pub extension: String,

    #[serde(default)]
    pub judge: JudgeConfig,

    #[serde(default)]
    pub fetch: FetchConfig,

    /// Source file extension => commands
    pub env: BTreeMap<String, EnvConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    pub shell: PathBuf,
    pub pause_on_non_exact: bool,
    pub echo_output: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub base_url: String,
    pub request_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnvConfig {
    #[serde(default)]
    pub compile: String,
    pub execute: String,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            shell: PathBuf::from("/bin/sh"),
            pause_on_non_exact: true,
            echo_output: true,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: codeforces::DEFAULT_BASE_URL.to_owned(),
            request_interval_ms: CodeforcesClient::DEFAULT_REQUEST_INTERVAL.as_millis() as u64,
        }
    }
}

impl FetchConfig {
    pub fn request_interval(&self) -> Duration {
        Duration::from_millis(self.request_interval_ms)
    }
}

impl EnvConfig {
    pub fn to_test_command(&self) -> TestCommand {
        let compile = self.compile.trim();
        TestCommand {
            compile: (!compile.is_empty()).then(|| compile.to_owned()),
            run: self.execute.to_owned(),
        }
    }
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

impl Config {
    pub const FILENAME: &str = "cfjudge.toml";

    fn default_replace_space() -> String {
        "_".to_owned()
    }

    pub fn example_toml() -> String {
        let file = Asset::get(Self::FILENAME).expect("example config must be embedded");
        String::from_utf8_lossy(file.data.as_ref()).into_owned()
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: PathBuf) -> anyhow::Result<Self> {
        let toml = fsutil::read_to_string(&filepath).context("Cannot read a config file")?;
        let mut cfg =
            Self::from_toml(&toml).map_err(|e| Error::InvalidConfig(filepath.clone(), e))?;
        cfg.source_config_file = Some(filepath);
        Ok(cfg)
    }

    pub fn user_config_filepath() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(Self::FILENAME))
    }

    /// Find config file in ancestor dirs (including current dir), then in the user config dir.
    pub fn find_file(cur_dir: impl AsRef<Path>) -> StdResult<PathBuf, Error> {
        if let Ok(path) = fsutil::find_file_in_ancestors(cur_dir, Self::FILENAME) {
            return Ok(path);
        }
        let user_file = Self::user_config_filepath();
        match user_file {
            Some(path) if path.is_file() => Ok(path),
            _ => Err(Error::ConfigurationMissing {
                filename: Self::FILENAME,
                user_config_dir: user_file.and_then(|p| p.parent().map(Path::to_owned)),
            }),
        }
    }

    pub fn from_file_finding(cur_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let filepath = Self::find_file(cur_dir)?;
        log::debug!("Using config {}", filepath.to_string_lossy());
        Self::from_toml_file(filepath)
    }

    /// Commands for the source extension (`"cpp"`; a leading dot is accepted).
    pub fn find_env(&self, ext: &str) -> Option<&EnvConfig> {
        let ext = ext.trim_start_matches('.');
        self.env
            .get(ext)
            .or_else(|| self.env.get(&format!(".{}", ext)))
    }

    /// `dir/4A.cpp` => `dir/4A.xml`
    pub fn testfile_path_for(&self, source_id: impl AsRef<Path>) -> PathBuf {
        let mut s = source_id.as_ref().as_os_str().to_owned();
        s.push(&self.extension);
        PathBuf::from(s)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::runner::TestRunner;

    #[test]
    fn example_toml_should_be_parsable() {
        let toml = Config::example_toml();
        let cfg = dbg!(Config::from_toml(&toml)).unwrap();

        let Config {
            source_config_file,
            pattern,
            replace_space,
            extension,
            judge,
            fetch,
            env,
        } = cfg;

        assert_eq!(source_config_file, None);
        assert_eq!(pattern, "#{contest}#{id} - lower(#{name})");
        assert_eq!(replace_space, "_");
        assert_eq!(extension, ".xml");

        assert_eq!(judge.shell, Path::new("/bin/sh"));
        assert!(judge.pause_on_non_exact);
        assert!(judge.echo_output);

        assert_eq!(fetch.base_url, "https://codeforces.com");
        assert_eq!(fetch.request_interval(), Duration::from_millis(600));

        assert_eq!(env.len(), 4);
        assert_eq!(env["py"].compile, "");
        assert_eq!(env["cpp"].execute, "#{fileDir}/#{fileStem}");
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let cfg = Config::from_toml(
            r##"
            pattern = "#{contest}#{id}"
            extension = ".xml"
            [env.".py"]
            execute = "python3 #{id}.py"
            "##,
        )
        .unwrap();
        assert_eq!(cfg.replace_space, "_");
        assert_eq!(cfg.judge, JudgeConfig::default());
        assert_eq!(cfg.fetch, FetchConfig::default());

        let env = cfg.find_env("py").unwrap();
        let cmd = env.to_test_command();
        assert_eq!(cmd.compile, None);
        assert_eq!(cmd.run, "python3 #{id}.py");
        assert!(cfg.find_env("cpp").is_none());
    }

    #[test]
    fn missing_required_field_is_error() {
        assert!(Config::from_toml("pattern = \"x\"").is_err());
    }

    #[test]
    fn find_env_accepts_leading_dot() {
        let cfg = Config::from_toml(&Config::example_toml()).unwrap();
        assert_eq!(cfg.find_env(".cpp"), cfg.find_env("cpp"));
        let cmd = cfg.find_env("cpp").unwrap().to_test_command();
        assert!(cmd.compile.is_some());
    }

    #[test]
    fn example_commands_run_relative_and_absolute_sources() {
        let cfg = Config::from_toml(&Config::example_toml()).unwrap();
        let cmd = cfg.find_env("cpp").unwrap().to_test_command();

        let rel = TestRunner::interpolate_command_with_program_file("4A.cpp", cmd.clone()).unwrap();
        assert_eq!(rel.run, "./4A");

        let abs =
            TestRunner::interpolate_command_with_program_file("/work/cf/4A.cpp", cmd).unwrap();
        assert_eq!(
            abs.compile.as_deref(),
            Some("g++ -std=gnu++17 -O2 -Wall -o /work/cf/4A /work/cf/4A.cpp")
        );
        assert_eq!(abs.run, "/work/cf/4A");
    }

    #[test]
    fn testfile_path() {
        let cfg = Config::from_toml(&Config::example_toml()).unwrap();
        assert_eq!(
            cfg.testfile_path_for("work/4A"),
            Path::new("work/4A.xml")
        );
    }

    #[test]
    fn find_file_in_ancestors() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("contest/1850");
        fsutil::mkdir_all(&nested).unwrap();
        fsutil::write(root.path().join(Config::FILENAME), Config::example_toml()).unwrap();

        let cfg = Config::from_file_finding(&nested).unwrap();
        assert_eq!(
            cfg.source_config_file.as_deref(),
            Some(root.path().join(Config::FILENAME).as_path())
        );
    }

    #[test]
    fn invalid_config_file_reports_path() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join(Config::FILENAME);
        fsutil::write(&path, "pattern = [").unwrap();

        let err = Config::from_toml_file(path.clone()).unwrap_err();
        match err.downcast_ref::<Error>() {
            Some(Error::InvalidConfig(p, _)) => assert_eq!(p, &path),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
