use std::{sync::Arc, time::Duration};

use ::tokio::sync::Mutex;
use ::tokio::time::{Interval, MissedTickBehavior};

pub use ::reqwest::{Error, IntoUrl, Request, Response};
pub type UrlGlob = ::glob::Pattern;

/// HTTP client that spaces out requests per URL glob.
#[derive(Clone)]
pub struct Client {
    inner: ::reqwest::Client,
    req_intervals: Vec<(UrlGlob, Arc<Mutex<Interval>>)>,
}

pub struct RequestBuilder {
    inner: ::reqwest::RequestBuilder,
    client: Client,
}

impl Client {
    const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

    pub fn new(
        url_wise_req_interval: impl IntoIterator<Item = (UrlGlob, Duration)>,
    ) -> Result<Self, Error> {
        let req_intervals = url_wise_req_interval
            .into_iter()
            .filter(|(_, dur)| !dur.is_zero())
            .map(|(pat, dur)| {
                let mut interval = ::tokio::time::interval(dur);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                (pat, Arc::new(Mutex::new(interval)))
            })
            .collect();
        let inner = ::reqwest::Client::builder()
            .user_agent(Self::USER_AGENT)
            .gzip(true)
            .build()?;
        Ok(Self {
            inner,
            req_intervals,
        })
    }

    pub fn get(&self, u: impl IntoUrl) -> RequestBuilder {
        RequestBuilder {
            inner: self.inner.get(u),
            client: self.clone(),
        }
    }

    async fn execute_request(&self, req: Request) -> Result<Response, Error> {
        let url_str = req.url().as_str();
        if let Some(interval) = self
            .req_intervals
            .iter()
            .find(|(pat, _)| pat.matches(url_str))
            .map(|(_, interval)| interval)
        {
            interval.lock().await.tick().await;
        }

        log::debug!("GET {}", url_str);
        self.inner.execute(req).await
    }
}

impl RequestBuilder {
    pub async fn send(self) -> Result<Response, Error> {
        let req = self.inner.build()?;
        self.client.execute_request(req).await
    }
}
