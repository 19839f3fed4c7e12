pub mod fetch;
pub mod init;
pub mod judge;

use std::path::PathBuf;

use cfjudge_core::Config;

use crate::util;

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Source file to judge (e.g. `4A.cpp` is judged against `4A.xml`)
    #[arg(required_unless_present_any = ["contest", "init"])]
    pub source: Option<PathBuf>,

    /// Fetch sample testcases of every problem in the contest
    #[arg(short, long, conflicts_with = "source")]
    pub contest: Option<String>,

    /// Fetch only this problem of the contest
    #[arg(short, long, requires = "contest")]
    pub problem: Option<String>,

    /// Do not wait for acknowledgment after a non-exact verdict
    #[arg(long)]
    pub no_pause: bool,

    /// Do not echo the program's output while it runs
    #[arg(short, long)]
    pub quiet: bool,

    /// Config file to use instead of searching for `cfjudge.toml`
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write an example `cfjudge.toml` into the current dir
    #[arg(long, conflicts_with_all = ["source", "contest"])]
    pub init: bool,
}

pub type CmdResult = anyhow::Result<()>;

impl Args {
    pub async fn exec(&self) -> CmdResult {
        if self.init {
            return init::exec(self);
        }
        if let Some(contest_id) = &self.contest {
            return fetch::exec(contest_id, self.problem.as_deref(), self).await;
        }
        match &self.source {
            Some(source) => judge::exec(source, self).await,
            None => anyhow::bail!("No source file is given"),
        }
    }

    pub fn load_config(&self) -> anyhow::Result<Config> {
        let cfg = match &self.config {
            Some(path) => Config::from_toml_file(path.clone())?,
            None => Config::from_file_finding(util::current_dir())?,
        };
        if let Some(path) = &cfg.source_config_file {
            log::debug!(
                "Loaded config {}",
                util::replace_homedir_to_tilde(path).to_string_lossy()
            );
        }
        Ok(cfg)
    }
}
