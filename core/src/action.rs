pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}

use std::io;
use std::path::{Path, PathBuf};

use cfjudge_webclient::{Client, ProblemInfo};
use error::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{Config, JudgeConfig};
use crate::error::Error as FatalError;
use crate::interactive::{self, SpinnerExt as _};
use crate::storage::FileNamer;
use crate::style;
use crate::testing::{ExecutionResult, TestCase, TestRunner, TestSuite, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JudgeOptions {
    /// Wait for the operator after every non-exact verdict.
    pub pause_on_non_exact: bool,
    /// Copy the program's stdout to the terminal while it runs.
    pub echo_output: bool,
}

impl From<&JudgeConfig> for JudgeOptions {
    fn from(cfg: &JudgeConfig) -> Self {
        Self {
            pause_on_non_exact: cfg.pause_on_non_exact,
            echo_output: cfg.echo_output,
        }
    }
}

/// Compile `program_file` and run it against the testcase file next to it.
///
/// Returns one result per executed case, in order. Fewer results than
/// testcases means the operator stopped the run.
pub async fn judge(
    program_file: impl AsRef<Path>,
    cfg: &Config,
    opts: JudgeOptions,
) -> Result<Vec<ExecutionResult>> {
    let program_file = program_file.as_ref();
    if !program_file.is_file() {
        bail!(FatalError::SourceNotFound(program_file.to_owned()));
    }

    let (id, ext) = fsutil::split_extension(program_file);
    let ext = ext.unwrap_or_default();
    let env = cfg
        .find_env(&ext)
        .ok_or_else(|| FatalError::UnknownLanguage(program_file.to_owned(), ext.clone()))?;

    let testfile = cfg.testfile_path_for(&id);
    let suite = TestSuite::load(&testfile).map_err(|e| {
        if e.is_not_found() {
            anyhow!(FatalError::TestFileNotFound(testfile.clone()))
        } else {
            anyhow!(e).context(format!(
                "Failed to load testcases from '{}'",
                testfile.to_string_lossy()
            ))
        }
    })?;

    let runner = TestRunner::new(env.to_test_command())
        .shell(cfg.judge.shell.to_owned())
        .echo_output(opts.echo_output)
        .program_file(program_file)?;

    if let Some(cmd) = &runner.get_command().compile {
        log::info!("Compiling {}", program_file.to_string_lossy());
        log::info!("{}", cmd);
        runner.compile().await?;
    }

    if suite.is_empty() {
        log::warn!(
            "No testcases in '{}', nothing to judge",
            testfile.to_string_lossy()
        );
        return Ok(Vec::new());
    }

    log::info!("Running: {}", runner.get_command().run);
    let results = run_suite(&runner, &suite, opts, interactive::ask_continue).await?;

    style::print_summary(&results);
    Ok(results)
}

/// Run every case in order, reporting each one before starting the next.
///
/// `ack` is asked after a non-exact verdict when pausing is enabled;
/// `Ok(false)` stops the run there.
pub async fn run_suite<F>(
    runner: &TestRunner,
    suite: &TestSuite,
    opts: JudgeOptions,
    mut ack: F,
) -> Result<Vec<ExecutionResult>>
where
    F: FnMut() -> io::Result<bool>,
{
    let mut results = Vec::with_capacity(suite.len());

    for (case, t) in suite.iter().enumerate() {
        if opts.echo_output {
            style::print_case_header(case);
        }
        let res = runner.run(t).await?;
        style::print_case_report(case, t, &res, !opts.echo_output);

        let verdict = res.verdict;
        results.push(res);

        if verdict != Verdict::Exact && opts.pause_on_non_exact {
            let go_on = ack().context("Failed to read acknowledgment")?;
            if !go_on {
                log::info!("Stopped after case #{}", case);
                break;
            }
        }
    }
    Ok(results)
}

/// Returns (saved_testcase_file, problem_info, testcases)
pub async fn fetch_and_save_problem(
    cli: &dyn Client,
    contest_id: &str,
    problem_id: &str,
    namer: &FileNamer<'_>,
    dir: impl AsRef<Path>,
) -> Result<(PathBuf, ProblemInfo, TestSuite)> {
    let (info, samples) = cli
        .fetch_problem(contest_id, problem_id)
        .await
        .with_context(|| format!("Failed to fetch problem {}{}", contest_id, problem_id))?;

    let filename = namer
        .filename(&info.contest_id, &info.problem_id, &info.name)
        .context("Invalid filename pattern")?;
    let filepath = dir.as_ref().join(filename);

    let suite: TestSuite = samples.into_iter().map(TestCase::from).collect();
    suite
        .save(&filepath)
        .context("Failed to save testcase file")?;
    log::info!(
        "Saved {} testcases to {}",
        suite.len(),
        filepath.to_string_lossy()
    );

    Ok((filepath, info, suite))
}

/// Fetch every problem of the contest. Returns saved file paths.
pub async fn fetch_and_save_contest(
    cli: &dyn Client,
    contest_id: &str,
    namer: &FileNamer<'_>,
    dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let problem_ids = cli
        .fetch_contest_problem_ids(contest_id)
        .await
        .with_context(|| format!("Failed to fetch contest {}", contest_id))?;
    ensure!(
        !problem_ids.is_empty(),
        "No problem found in contest {}",
        contest_id
    );

    let style = ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let spinner = ProgressBar::new_spinner().with_style(style).with_ticking();

    let mut saved = Vec::with_capacity(problem_ids.len());
    for problem_id in &problem_ids {
        spinner
            .lock()
            .await
            .set_message(format!("Fetching {}{} ...", contest_id, problem_id));

        let res = fetch_and_save_problem(cli, contest_id, problem_id, namer, &dir).await;
        let (path, info, suite) = match res {
            Ok(x) => x,
            Err(e) => {
                spinner.lock().await.finish_and_clear();
                return Err(e);
            }
        };
        spinner.lock().await.println(format!(
            "contest={:?}, id={:?}, problem={:?} is downloaded ({} testcases) => {}",
            info.contest_id,
            info.problem_id,
            info.name,
            suite.len(),
            path.to_string_lossy(),
        ));
        saved.push(path);
    }
    spinner.lock().await.finish_and_clear();
    Ok(saved)
}

/// Write the example config into `dir`. Never overwrites an existing file.
pub fn init_config(dir: impl AsRef<Path>) -> Result<PathBuf> {
    let filepath = dir.as_ref().join(Config::FILENAME);
    ensure!(
        !filepath.exists(),
        "'{}' already exists",
        filepath.to_string_lossy()
    );
    fsutil::write_with_mkdir(&filepath, Config::example_toml())?;
    Ok(filepath)
}
