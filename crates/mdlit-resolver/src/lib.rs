//! Mention icon and label resolution for mdlit.
//!
//! A mention written as a bare URL (`@(github.com/foo/bar)`) needs an icon and
//! a label. [`Resolver::resolve`] derives them:
//!
//! - URLs on a known [`Platform`] get that platform's icon keyword and a label
//!   computed from the URL alone.
//! - Any other URL falls back to scraping the page's title and favicon over
//!   HTTP. Results, failures included, are memoised in an [`IconCache`].
//!
//! Network failures never propagate: they degrade to
//! [`Resolution::Unresolved`] and are logged.
//!
//! # Example
//!
//! ```
//! use mdlit_resolver::{Resolution, ResolvedLink, Resolver};
//!
//! let resolver = Resolver::offline();
//! assert_eq!(
//!     resolver.resolve("github.com/foo/bar"),
//!     Resolution::Resolved(ResolvedLink {
//!         icon: "github".to_owned(),
//!         label: "foo/bar".to_owned(),
//!     })
//! );
//! assert_eq!(resolver.resolve("example.com"), Resolution::Unresolved);
//! ```

mod cache;
mod fetch;
mod platform;

use std::borrow::Cow;

pub use cache::{Eviction, IconCache};
pub use fetch::{
    FetchError, HttpClient, HttpResponse, PageInfo, UreqClient, extract_title, fetch_page_info,
    find_icon_href,
};
pub use platform::Platform;

/// Icon and label derived for a URL.
///
/// `icon` is either a platform keyword (see [`Platform::keyword`]) or an
/// absolute image URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedLink {
    pub icon: String,
    pub label: String,
}

/// Outcome of resolving a URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedLink),
    /// Nothing could be derived; callers substitute their generic icon and label.
    Unresolved,
}

impl Resolution {
    /// Resolved link, or one built from the given fallbacks.
    #[must_use]
    pub fn unwrap_or(self, fallback_icon: &str, fallback_label: &str) -> ResolvedLink {
        match self {
            Self::Resolved(link) => link,
            Self::Unresolved => ResolvedLink {
                icon: fallback_icon.to_owned(),
                label: fallback_label.to_owned(),
            },
        }
    }
}

/// Derives icons and labels for mention URLs.
///
/// Shared across renders behind an `Arc`; the cache is internally
/// synchronized.
pub struct Resolver {
    client: Option<Box<dyn HttpClient>>,
    cache: IconCache,
}

impl Resolver {
    /// Create a resolver that falls back to `client` for unknown URLs.
    #[must_use]
    pub fn new(client: impl HttpClient + 'static) -> Self {
        Self {
            client: Some(Box::new(client)),
            cache: IconCache::new(),
        }
    }

    /// Create a resolver that never touches the network.
    ///
    /// Unknown URLs resolve to [`Resolution::Unresolved`].
    #[must_use]
    pub fn offline() -> Self {
        Self {
            client: None,
            cache: IconCache::new(),
        }
    }

    /// Replace the cache (e.g. to bound its size).
    #[must_use]
    pub fn with_cache(mut self, cache: IconCache) -> Self {
        self.cache = cache;
        self
    }

    /// Check if unknown URLs are looked up over the network.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.client.is_some()
    }

    /// Memoised network resolutions.
    #[must_use]
    pub fn cache(&self) -> &IconCache {
        &self.cache
    }

    /// Derive an icon and label for `url`.
    pub fn resolve(&self, url: &str) -> Resolution {
        if let Some(platform) = Platform::classify(url) {
            return Resolution::Resolved(ResolvedLink {
                icon: platform.keyword().to_owned(),
                label: platform.label(url),
            });
        }

        let Some(client) = self.client.as_deref() else {
            tracing::debug!(url, "Offline, leaving link unresolved");
            return Resolution::Unresolved;
        };

        self.cache
            .get_or_resolve(url, || match fetch_page_info(client, url) {
                Ok(info) => Resolution::Resolved(ResolvedLink {
                    icon: info.favicon,
                    label: info.title,
                }),
                Err(e) => {
                    tracing::warn!(url, error = %e, "Failed to resolve link icon and label");
                    Resolution::Unresolved
                }
            })
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("online", &self.is_online())
            .field("cache", &self.cache)
            .finish()
    }
}

/// Prepend `https://` unless `url` already names a scheme.
///
/// `scheme://…` URLs and `mailto:`/`tel:` URIs are returned unchanged.
#[must_use]
pub fn ensure_scheme(url: &str) -> Cow<'_, str> {
    if has_scheme(url) {
        Cow::Borrowed(url)
    } else {
        Cow::Owned(format!("https://{url}"))
    }
}

fn has_scheme(url: &str) -> bool {
    if let Some((scheme, _)) = url.split_once("://") {
        let mut chars = scheme.chars();
        return chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    }
    ["mailto:", "tel:"].iter().any(|prefix| {
        url.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}
