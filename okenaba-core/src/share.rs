//! Public site link shown once the wizard completes.

pub const DEFAULT_SITE_BASE_URL: &str = "https://presence.app";

/// `Joe's  Bakery` -> `joe's-bakery`; empty names fall back to `yourname`.
pub fn site_slug(name: &str) -> String {
    let slug = name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "yourname".to_string()
    } else {
        slug
    }
}

pub fn site_link(base_url: &str, name: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), site_slug(name))
}
