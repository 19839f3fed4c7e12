use reqwest::StatusCode;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::{error::*, http::Client};

pub fn parse_url(url: impl AsRef<str>) -> Result<Url> {
    match Url::parse(url.as_ref()) {
        Ok(url) => Ok(url),
        Err(e) => Err(Error::InvalidSyntaxUrl {
            url: url.as_ref().to_owned(),
            source: e,
        }),
    }
}

pub fn selector_must_parsed(sel: &'static str) -> Selector {
    Selector::parse(sel).expect("Failed to parse  `&'static str`  selector")
}

pub async fn fetch_html(c: &Client, url: Url) -> Result<Html> {
    let url_str = url.to_string();
    let resp = c.get(url).send().await?;

    let status = resp.status();
    if status != StatusCode::OK {
        return Err(Error::UnexpectedResponseCode {
            got: status,
            expected: StatusCode::OK,
            requested_url: url_str,
        });
    }

    let html = resp.text().await?;
    Ok(Html::parse_document(&html))
}

pub trait DocExt {
    fn select_first(&self, css: &'static str) -> Result<ElementRef>;
}

impl DocExt for Html {
    fn select_first(&self, css: &'static str) -> Result<ElementRef> {
        let sel = self::selector_must_parsed(css);
        let res = self.select(&sel).next();
        res.ok_or(Error::NoSuchElementMatchesToSelector(css))
    }
}

impl<'a> DocExt for ElementRef<'a> {
    fn select_first(&self, css: &'static str) -> Result<ElementRef> {
        let sel = self::selector_must_parsed(css);
        let res = self.select(&sel).next();
        res.ok_or(Error::NoSuchElementMatchesToSelector(css))
    }
}

pub trait ElementRefExt {
    fn first_text(&self, ctx_css: &'static str) -> Result<&str>;
}

impl<'a> ElementRefExt for ElementRef<'a> {
    fn first_text(&self, ctx_css: &'static str) -> Result<&str> {
        match self.text().map(str::trim).find(|s| !s.is_empty()) {
            Some(s) => Ok(s),
            None => Err(Error::NoInnerText(ctx_css)),
        }
    }
}
