//! Where a calendar feed comes from: a local file or a URL.

use std::path::PathBuf;

use anyhow::{Context, Result};
use calitask_core::project_title_for;
use url::Url;

const WEBCAL_SCHEME: &str = "webcal";

#[derive(Debug, Clone, PartialEq)]
pub enum FeedSource {
    File(PathBuf),
    Url(Url),
}

impl FeedSource {
    /// Interpret a command-line argument. `webcal://` links are fetched over https.
    pub fn parse(arg: &str) -> Result<Self> {
        let Some((scheme, rest)) = arg.split_once("://") else {
            return Ok(FeedSource::File(PathBuf::from(arg)));
        };

        let scheme = scheme.to_ascii_lowercase();
        let url = match scheme.as_str() {
            WEBCAL_SCHEME => format!("https://{}", rest),
            "http" | "https" => arg.to_string(),
            _ => anyhow::bail!("Unsupported feed URL scheme '{}'", scheme),
        };

        let url = Url::parse(&url).with_context(|| format!("Invalid feed URL: {}", arg))?;
        Ok(FeedSource::Url(url))
    }

    /// Default project title: the feed's file name without its extension.
    pub fn project_title(&self) -> String {
        let name = match self {
            FeedSource::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            FeedSource::Url(url) => url
                .path_segments()
                .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
                .map(str::to_string)
                .unwrap_or_default(),
        };

        project_title_for(&name)
    }

    pub async fn read(&self) -> Result<String> {
        match self {
            FeedSource::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
            FeedSource::Url(url) => {
                let resp = reqwest::get(url.clone())
                    .await
                    .with_context(|| format!("Failed to fetch {}", url))?
                    .error_for_status()
                    .with_context(|| format!("Failed to fetch {}", url))?;

                Ok(resp.text().await?)
            }
        }
    }
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedSource::File(path) => write!(f, "{}", path.display()),
            FeedSource::Url(url) => write!(f, "{}", url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_is_a_file() {
        assert_eq!(
            FeedSource::parse("cal/work.ics").unwrap(),
            FeedSource::File(PathBuf::from("cal/work.ics"))
        );
    }

    #[test]
    fn test_webcal_is_rewritten_to_https() {
        let source = FeedSource::parse("webcal://example.com/feeds/holidays.ics").unwrap();
        assert_eq!(source.to_string(), "https://example.com/feeds/holidays.ics");

        let source = FeedSource::parse("WEBCAL://example.com/h.ics").unwrap();
        assert_eq!(source.to_string(), "https://example.com/h.ics");
    }

    #[test]
    fn test_http_urls_are_kept() {
        let source = FeedSource::parse("http://example.com/a.ics").unwrap();
        assert_eq!(source.to_string(), "http://example.com/a.ics");
    }

    #[test]
    fn test_unknown_scheme_is_rejected() {
        assert!(FeedSource::parse("ftp://example.com/a.ics").is_err());
    }

    #[test]
    fn test_project_title() {
        let title = |arg: &str| FeedSource::parse(arg).unwrap().project_title();

        assert_eq!(title("/home/me/Work.ics"), "Work");
        assert_eq!(title("team.calendar"), "team");
        assert_eq!(title("https://example.com/feeds/holidays.ics"), "holidays");
        assert_eq!(title("https://example.com/feeds/holidays.ics/"), "holidays");
        assert_eq!(title("https://example.com/"), "Imported Calendar");
    }
}
