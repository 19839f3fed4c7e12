use cfjudge_core::{action, print_success};

use super::{Args, CmdResult};
use crate::util;

pub fn exec(_: &Args) -> CmdResult {
    let path = action::init_config(util::current_dir())?;
    print_success!(
        "Successfully created an example config. (path: {})",
        path.to_string_lossy()
    );
    Ok(())
}
