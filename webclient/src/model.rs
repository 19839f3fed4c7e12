use async_trait::async_trait;

use crate::error::*;

pub use url::Url;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ProblemInfo {
    pub url: Url,
    /// e.g. "4"
    pub contest_id: String,
    /// e.g. "A"
    pub problem_id: String,
    /// e.g. "Watermelon"
    pub name: String,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SampleTestcase {
    pub ord: u32,
    pub input: String,
    pub output: String,
}

#[async_trait]
pub trait Client: Send + Sync {
    fn base_url(&self) -> &Url;

    /// Problem ids listed on the contest page, in page order.
    async fn fetch_contest_problem_ids(&self, contest_id: &str) -> Result<Vec<String>>;

    async fn fetch_problem(
        &self,
        contest_id: &str,
        problem_id: &str,
    ) -> Result<(ProblemInfo, Vec<SampleTestcase>)>;
}
