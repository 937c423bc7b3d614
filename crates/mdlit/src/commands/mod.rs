//! CLI command implementations.

pub(crate) mod mention;
pub(crate) mod render;
pub(crate) mod resolve;

pub(crate) use mention::MentionArgs;
pub(crate) use render::RenderArgs;
pub(crate) use resolve::ResolveArgs;

use std::num::NonZeroUsize;
use std::sync::Arc;

use mdlit_config::{Config, ResolverConfig};
use mdlit_renderer::{ExtensionOptions, MentionOptions};
use mdlit_resolver::{Eviction, IconCache, Resolver, UreqClient};

/// Build the shared resolver described by `[resolver]`.
pub(crate) fn build_resolver(config: &ResolverConfig) -> Resolver {
    let resolver = if config.network {
        Resolver::new(UreqClient::new(
            config.timeout(),
            config.user_agent.as_str(),
        ))
    } else {
        Resolver::offline()
    };
    let eviction = config
        .cache_capacity
        .and_then(NonZeroUsize::new)
        .map_or(Eviction::Never, Eviction::Capacity);
    resolver.with_cache(IconCache::with_eviction(eviction))
}

/// Extension options from a loaded configuration.
pub(crate) fn extension_options(config: &Config) -> ExtensionOptions {
    ExtensionOptions {
        resolver: Arc::new(build_resolver(&config.resolver)),
        mention: mention_options(config),
    }
}

fn mention_options(config: &Config) -> MentionOptions {
    MentionOptions {
        fallback_icon: config.mention.fallback_icon.clone(),
        fallback_label: config.mention.fallback_label.clone(),
    }
}
