use std::path::Path;

use cfjudge_core::action::{self, JudgeOptions};

use super::{Args, CmdResult};

pub async fn exec(source: &Path, args: &Args) -> CmdResult {
    let cfg = args.load_config()?;

    let mut opts = JudgeOptions::from(&cfg.judge);
    if args.no_pause {
        opts.pause_on_non_exact = false;
    }
    if args.quiet {
        opts.echo_output = false;
    }

    let _ = action::judge(source, &cfg, opts).await?;
    Ok(())
}
