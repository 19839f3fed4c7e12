use cfjudge_core::{action, print_success, storage::FileNamer};
use cfjudge_webclient::CodeforcesClient;

use super::{Args, CmdResult};
use crate::util;

pub async fn exec(contest_id: &str, problem_id: Option<&str>, args: &Args) -> CmdResult {
    let cfg = args.load_config()?;

    let cli = CodeforcesClient::new(&cfg.fetch.base_url, cfg.fetch.request_interval())?;

    let namer = FileNamer::from_config(&cfg);
    let dir = util::current_dir();

    match problem_id {
        Some(problem_id) => {
            let (path, info, suite) =
                action::fetch_and_save_problem(&cli, contest_id, problem_id, &namer, &dir).await?;
            print_success!(
                "Saved {} testcases of '{}' in '{}'",
                suite.len(),
                info.name,
                path.to_string_lossy()
            );
        }
        None => {
            let saved = action::fetch_and_save_contest(&cli, contest_id, &namer, &dir).await?;
            print_success!(
                "Successfully fetched {} problems of contest {}",
                saved.len(),
                contest_id
            );
        }
    }
    Ok(())
}
