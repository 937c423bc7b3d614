//! Network fallback: page title and favicon scraping.
//!
//! Only URLs that match no known [`Platform`](crate::Platform) reach this
//! module. The page is fetched once; its `<title>` becomes the label and its
//! icon link (or the site's `/favicon.ico`) becomes the icon.

use std::borrow::Cow;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use ureq::Agent;
use url::Url;

use crate::ensure_scheme;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").unwrap());

static LINK_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<link\b[^>]*>").unwrap());

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(rel|href)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap()
});

/// Error raised while scraping a page. Never surfaces to renders.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport failure (DNS, connect, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(String),
    /// Server answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
    /// Response body could not be read.
    #[error("I/O error: {0}")]
    Io(String),
    /// URL could not be parsed or joined.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// Page has no usable `<title>`.
    #[error("page has no title")]
    MissingTitle,
    /// Page declares no icon and `/favicon.ico` is not served.
    #[error("page has no favicon")]
    MissingFavicon,
}

/// Response of a single GET request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Check for a 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Minimal HTTP interface used by the fallback.
///
/// Implementations must report non-2xx responses as `Ok` with the status
/// set, reserving `Err` for transport failures.
pub trait HttpClient: Send + Sync {
    /// Perform a GET request.
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

/// Production client backed by a pooled `ureq` agent.
#[derive(Debug)]
pub struct UreqClient {
    agent: Agent,
    user_agent: String,
}

impl UreqClient {
    /// Create a client with a global request timeout and `User-Agent`.
    #[must_use]
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            user_agent: user_agent.into(),
        }
    }
}

impl HttpClient for UreqClient {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        tracing::debug!(url, "Fetching");
        let response = self
            .agent
            .get(url)
            .header("User-Agent", self.user_agent.as_str())
            .call()
            .map_err(|e| FetchError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .into_body()
            .read_to_vec()
            .map_err(|e| FetchError::Io(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

/// Title and icon scraped from a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageInfo {
    /// Whitespace-collapsed `<title>` text.
    pub title: String,
    /// Absolute favicon URL.
    pub favicon: String,
}

/// Fetch `url` and scrape its title and favicon.
///
/// Costs one GET for the page, plus one GET probing `/favicon.ico` when the
/// page declares no icon link.
///
/// # Errors
///
/// Returns an error if either request fails, the page responds with a non-2xx
/// status, or the title or favicon cannot be found.
pub fn fetch_page_info(client: &dyn HttpClient, url: &str) -> Result<PageInfo, FetchError> {
    let page_url = Url::parse(&ensure_scheme(url))?;

    let response = client.get(page_url.as_str())?;
    if !response.is_success() {
        return Err(FetchError::Status {
            url: page_url.to_string(),
            status: response.status,
        });
    }

    let html = response.text();
    let title = extract_title(&html).ok_or(FetchError::MissingTitle)?;

    let favicon = match find_icon_href(&html) {
        Some(href) => page_url.join(&href)?.to_string(),
        None => probe_favicon(client, &page_url)?,
    };

    Ok(PageInfo { title, favicon })
}

fn probe_favicon(client: &dyn HttpClient, page_url: &Url) -> Result<String, FetchError> {
    let probe = page_url.join("/favicon.ico")?;
    let response = client.get(probe.as_str())?;
    if response.is_success() {
        Ok(probe.to_string())
    } else {
        Err(FetchError::MissingFavicon)
    }
}

/// Text of the first `<title>` element, or `None` if absent or blank.
#[must_use]
pub fn extract_title(html: &str) -> Option<String> {
    let raw = TITLE_RE.captures(html)?.get(1)?.as_str();
    let decoded = html_escape::decode_html_entities(raw);
    let title = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
    (!title.is_empty()).then_some(title)
}

/// `href` of the first `<link>` whose `rel` mentions `icon`.
#[must_use]
pub fn find_icon_href(html: &str) -> Option<String> {
    LINK_TAG_RE.find_iter(html).find_map(|tag| {
        let mut rel = None;
        let mut href = None;
        for attr in ATTR_RE.captures_iter(tag.as_str()) {
            let value = attr
                .get(2)
                .or_else(|| attr.get(3))
                .or_else(|| attr.get(4))
                .map_or("", |m| m.as_str());
            if attr[1].eq_ignore_ascii_case("rel") {
                rel.get_or_insert(value);
            } else {
                href.get_or_insert(value);
            }
        }
        let is_icon = rel.is_some_and(|r| {
            r.split_whitespace()
                .any(|token| token.to_ascii_lowercase().contains("icon"))
        });
        match href {
            Some(h) if is_icon && !h.trim().is_empty() => {
                Some(html_escape::decode_html_entities(h.trim()).into_owned())
            }
            _ => None,
        }
    })
}
