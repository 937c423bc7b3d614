//! Known platforms recognized from domain markers in a URL.

/// A platform with a dedicated icon and label scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Social platform: tweets and profiles.
    Twitter,
    /// App hosting.
    Streamlit,
    /// Code hosting.
    GitHub,
    /// Note taking.
    Notion,
}

const GITHUB_ICON: &str = "https://cdn-icons-png.flaticon.com/512/25/25231.png";
const NOTION_ICON: &str = "https://upload.wikimedia.org/wikipedia/commons/4/45/Notion_app_logo.png";
const TWITTER_ICON: &str =
    "https://seeklogo.com/images/T/twitter-icon-circle-blue-logo-0902F48837-seeklogo.com.png";
const STREAMLIT_ICON: &str = "https://aws1.discourse-cdn.com/business7/uploads/streamlit/original/2X/f/f0d0d26db1f2d99da8472951c60e5a1b782eb6fe.png";

const TWITTER_MARKER: &str = "twitter.com";
const STREAMLIT_MARKERS: [&str; 3] = ["streamlitapp.com", "streamlit.io", "streamlit.app"];
const GITHUB_MARKER: &str = "github.com";
const NOTION_MARKER: &str = "notion.so";

impl Platform {
    /// All platforms, in classification order.
    pub const ALL: [Self; 4] = [Self::Twitter, Self::Streamlit, Self::GitHub, Self::Notion];

    /// Keyword accepted as a mention icon (e.g. `@(github)(Repo)(...)`).
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Streamlit => "streamlit",
            Self::GitHub => "github",
            Self::Notion => "notion",
        }
    }

    /// Look up a platform by keyword, ignoring ASCII case.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.keyword().eq_ignore_ascii_case(keyword))
    }

    /// Canonical image URL for this platform's icon.
    #[must_use]
    pub fn icon_url(self) -> &'static str {
        match self {
            Self::Twitter => TWITTER_ICON,
            Self::Streamlit => STREAMLIT_ICON,
            Self::GitHub => GITHUB_ICON,
            Self::Notion => NOTION_ICON,
        }
    }

    /// Classify a raw URL by case-sensitive domain marker.
    ///
    /// Markers are tested in [`Platform::ALL`] order and the first hit wins,
    /// so `github.com/streamlit.io` is a Streamlit link.
    #[must_use]
    pub fn classify(url: &str) -> Option<Self> {
        if url.contains(TWITTER_MARKER) {
            Some(Self::Twitter)
        } else if STREAMLIT_MARKERS.iter().any(|m| url.contains(m)) {
            Some(Self::Streamlit)
        } else if url.contains(GITHUB_MARKER) {
            Some(Self::GitHub)
        } else if url.contains(NOTION_MARKER) {
            Some(Self::Notion)
        } else {
            None
        }
    }

    /// Derive the mention label for a URL already classified as `self`.
    #[must_use]
    pub fn label(self, url: &str) -> String {
        match self {
            Self::Twitter => twitter_label(url),
            Self::Streamlit => "Streamlit App".to_owned(),
            Self::GitHub => github_label(url),
            Self::Notion => "Notion page".to_owned(),
        }
    }
}

/// Handle for a status URL, last segment for a profile URL.
fn twitter_label(url: &str) -> String {
    if url.contains("status")
        && let Some((_, after)) = url.split_once("twitter.com/")
    {
        return after.split('/').next().unwrap_or_default().to_owned();
    }
    url.rsplit('/').next().unwrap_or_default().to_owned()
}

/// `owner/repo` from the last two segments.
fn github_label(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    let mut segments = trimmed.rsplit('/');
    let last = segments.next().unwrap_or_default();
    match segments.next() {
        Some(owner) => format!("{owner}/{last}"),
        None => last.to_owned(),
    }
}
