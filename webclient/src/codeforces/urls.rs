use ::lazy_regex::{lazy_regex, Lazy, Regex};

use crate::{error::*, util, Url};

static RE_CONTEST_ID: Lazy<Regex> = lazy_regex!(r"^[0-9]+$");
static RE_PROBLEM_ID: Lazy<Regex> = lazy_regex!(r"^[A-Za-z][0-9A-Za-z]*$");

pub const DEFAULT_BASE_URL: &str = "https://codeforces.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeforcesUrls {
    base: Url,
}

impl CodeforcesUrls {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base: util::parse_url(base_url)?,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn base_str(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    pub fn contest(&self, contest_id: &str) -> Result<Url> {
        ensure_contest_id(contest_id)?;
        util::parse_url(format!("{}/contest/{}", self.base_str(), contest_id))
    }

    pub fn problem(&self, contest_id: &str, problem_id: &str) -> Result<Url> {
        ensure_contest_id(contest_id)?;
        ensure_problem_id(problem_id)?;
        util::parse_url(format!(
            "{}/contest/{}/problem/{}",
            self.base_str(),
            contest_id,
            problem_id
        ))
    }
}

fn ensure_contest_id(id: &str) -> Result<()> {
    if RE_CONTEST_ID.is_match(id) {
        Ok(())
    } else {
        Err(Error::InvalidId {
            kind: "contest",
            id: id.to_owned(),
        })
    }
}

fn ensure_problem_id(id: &str) -> Result<()> {
    if RE_PROBLEM_ID.is_match(id) {
        Ok(())
    } else {
        Err(Error::InvalidId {
            kind: "problem",
            id: id.to_owned(),
        })
    }
}
