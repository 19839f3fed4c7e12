use ::async_trait::async_trait;
use ::std::time::Duration;

use super::{scrape, urls::*};
use crate::{error::*, http, model::*, util};

pub struct CodeforcesClient {
    http: http::Client,
    urls: CodeforcesUrls,
}

impl CodeforcesClient {
    pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_millis(600);

    pub fn new(base_url: &str, request_interval: Duration) -> Result<Self> {
        let urls = CodeforcesUrls::new(base_url)?;
        let glob = format!("{}*", http::UrlGlob::escape(urls.base().as_str()));
        let pattern = http::UrlGlob::new(&glob).expect("escaped url must be a valid glob");
        Ok(Self {
            http: http::Client::new([(pattern, request_interval)])?,
            urls,
        })
    }
}

#[async_trait]
impl Client for CodeforcesClient {
    fn base_url(&self) -> &Url {
        self.urls.base()
    }

    async fn fetch_contest_problem_ids(&self, contest_id: &str) -> Result<Vec<String>> {
        let url = self.urls.contest(contest_id)?;
        let doc = util::fetch_html(&self.http, url).await?;
        Ok(scrape::problem_ids(&doc))
    }

    async fn fetch_problem(
        &self,
        contest_id: &str,
        problem_id: &str,
    ) -> Result<(ProblemInfo, Vec<SampleTestcase>)> {
        let url = self.urls.problem(contest_id, problem_id)?;
        let doc = util::fetch_html(&self.http, url.clone()).await?;

        let title = scrape::title(&doc)?;
        let testcases = scrape::testcases(&doc);
        if testcases.is_empty() {
            log::warn!("No sample testcase found in {}", url);
        }

        let info = ProblemInfo {
            url,
            contest_id: contest_id.to_owned(),
            problem_id: problem_id.to_owned(),
            name: scrape::problem_name_from_title(&title).to_owned(),
        };
        Ok((info, testcases))
    }
}
