//! Link mentions: an icon plus an underlined label inside an anchor.

use std::io;

use mdlit_resolver::{Platform, Resolver, ensure_scheme};
use url::Url;

use crate::node::{Child, MarkupNode};
use crate::surface::DisplaySurface;

const ANCHOR_STYLE: &str =
    "color:inherit;text-decoration:inherit; height:auto!important;margin-left:5px;";
const ICON_STYLE: &str =
    "width:1em;height:1em;vertical-align:-0.15em;border-radius:3px;margin-right:0.3em";
const LABEL_STYLE: &str =
    "border-bottom:0.05em solid rgba(55,53,47,0.25);font-weight:500;flex-shrink:0;";

/// Icon and label used when a URL cannot be resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MentionOptions {
    pub fallback_icon: String,
    pub fallback_label: String,
}

impl Default for MentionOptions {
    fn default() -> Self {
        Self {
            fallback_icon: "🔗".to_owned(),
            fallback_label: "Link".to_owned(),
        }
    }
}

/// Arguments of a mention, by how many groups were written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MentionArgs {
    /// `@(url)`: icon and label come from the resolver.
    Url { url: String },
    /// `@(label)(url)`: icon comes from the resolver.
    Labeled { label: String, url: String },
    /// `@(icon)(label)(url)`: used as written.
    Full {
        icon: String,
        label: String,
        url: String,
    },
}

impl MentionArgs {
    /// Build from one to three captured groups, stripping enclosing parentheses.
    ///
    /// Returns `None` for zero or more than three groups.
    pub fn from_groups<'a>(groups: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let groups: Vec<String> = groups
            .into_iter()
            .map(|g| g.trim_matches(['(', ')']).to_owned())
            .collect();
        match <[String; 3]>::try_from(groups) {
            Ok([icon, label, url]) => Some(Self::Full { icon, label, url }),
            Err(groups) => match <[String; 2]>::try_from(groups) {
                Ok([label, url]) => Some(Self::Labeled { label, url }),
                Err(groups) => match <[String; 1]>::try_from(groups) {
                    Ok([url]) => Some(Self::Url { url }),
                    Err(_) => None,
                },
            },
        }
    }

    /// Target URL as written.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Url { url } | Self::Labeled { url, .. } | Self::Full { url, .. } => url,
        }
    }

    /// Fill in missing fields from `resolver`, falling back to `options`.
    ///
    /// The three-argument form never consults the resolver.
    #[must_use]
    pub fn into_spec(self, resolver: &Resolver, options: &MentionOptions) -> MentionSpec {
        let resolve = |url: &str| {
            resolver
                .resolve(url)
                .unwrap_or(&options.fallback_icon, &options.fallback_label)
        };
        match self {
            Self::Url { url } => {
                let link = resolve(&url);
                MentionSpec::new(link.icon, link.label, &url)
            }
            Self::Labeled { label, url } => {
                let link = resolve(&url);
                MentionSpec::new(link.icon, label, &url)
            }
            Self::Full { icon, label, url } => MentionSpec::new(icon, label, &url),
        }
    }
}

/// A fully specified mention.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MentionSpec {
    /// Platform keyword, image URL, or literal glyph.
    pub icon: String,
    pub label: String,
    /// Target URL, always carrying a scheme.
    pub url: String,
}

impl MentionSpec {
    /// Create a spec, prepending `https://` to `url` when it has no scheme.
    pub fn new(icon: impl Into<String>, label: impl Into<String>, url: &str) -> Self {
        Self {
            icon: icon.into(),
            label: label.into(),
            url: ensure_scheme(url).into_owned(),
        }
    }
}

/// Builds mention markup.
#[derive(Clone, Copy, Debug, Default)]
pub struct MentionRenderer;

impl MentionRenderer {
    /// Build the mention anchor for inline embedding.
    #[must_use]
    pub fn render(spec: &MentionSpec) -> MarkupNode {
        MarkupNode::new("a")
            .with_attr("contenteditable", "false")
            .with_attr("href", spec.url.as_str())
            .with_attr("rel", "noopener noreferrer")
            .with_attr("style", ANCHOR_STYLE)
            .with_attr("target", "_blank")
            .with_child(MarkupNode::new("span"))
            .with_child(icon_child(&spec.icon))
            .with_child(
                MarkupNode::new("span")
                    .with_attr("style", LABEL_STYLE)
                    .with_child(spec.label.as_str()),
            )
            .with_child(MarkupNode::new("span"))
    }

    /// Write the mention straight to a display surface.
    pub fn write(spec: &MentionSpec, surface: &mut dyn DisplaySurface) -> io::Result<()> {
        surface.write_trusted_html(&Self::render(spec).to_html())
    }
}

/// Image for keywords and URLs, padded text for anything else.
fn icon_child(icon: &str) -> Child {
    let src = Platform::from_keyword(icon).map_or(icon, |p| p.icon_url());
    if is_image_url(src) {
        MarkupNode::new("img")
            .with_attr("src", src)
            .with_attr("alt", "")
            .with_attr("style", ICON_STYLE)
            .into()
    } else {
        Child::Text(format!("{icon}  "))
    }
}

fn is_image_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https" | "ftp")
            && url.host_str().is_some_and(|host| !host.is_empty())
    })
}
