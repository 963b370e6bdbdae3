//! Style token resolution.
//!
//! Turns a free-form style token (from a request field or a URL path
//! segment) into a canonical style id plus an optional bullet count. Unknown
//! tokens are not an error: they pass through as "custom" styles for the
//! model to interpret creatively.

use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;

/// Preset style ids with dedicated prompt templates.
pub const PRESET_STYLES: &[&str] = &["standard", "simple", "bullets", "eli5", "concise", "tweet"];

/// Default number of items for the bullets style.
pub const DEFAULT_BULLET_COUNT: u32 = 5;

/// Fixed alias table mapping known variant spellings (post-normalization) to
/// canonical ids. First match wins; lookup precedes pass-through.
const STYLE_ALIASES: &[(&str, &str)] = &[
    ("bullet", "bullets"),
    ("bulletpoints", "bullets"),
    ("bullet-points", "bullets"),
    ("bullet-point", "bullets"),
    ("points", "bullets"),
    ("numbered", "bullets"),
    ("numbered-list", "bullets"),
    ("list", "bullets"),
    ("twitter", "tweet"),
    ("x", "tweet"),
    ("tweets", "tweet"),
    ("explainlikeimfive", "eli5"),
    ("explain-like-im-five", "eli5"),
    ("explain-like-i-am-five", "eli5"),
    ("eli-5", "eli5"),
    ("five-year-old", "eli5"),
    ("jerry-seinfeld", "seinfeld-standup"),
    ("seinfeld", "seinfeld-standup"),
    ("simple-english", "simple"),
    ("plain", "simple"),
    ("plain-english", "simple"),
    ("easy", "simple"),
    ("short", "concise"),
    ("brief", "concise"),
    ("tldr", "concise"),
    ("tl-dr", "concise"),
    ("default", "standard"),
    ("normal", "standard"),
    ("regular", "standard"),
    ("summary", "standard"),
];

/// A raw style token as parsed from a path segment or request field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRequest {
    pub raw: String,
    pub bullet_count: Option<u32>,
}

/// A canonical, alias-resolved style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStyle {
    /// Canonical id: a preset, an alias target, or a pass-through custom token.
    pub id: String,
    /// True when the id is not a preset and will be interpreted creatively.
    pub is_custom: bool,
    /// Only meaningful for the bullets style.
    pub bullet_count: Option<u32>,
}

impl ResolvedStyle {
    #[must_use]
    pub fn is_bullet_style(&self) -> bool {
        self.id == "bullets"
    }
}

/// Lowercases, strips characters outside `[a-z0-9_\s-]`, and collapses
/// whitespace runs to single hyphens.
#[must_use]
pub fn normalize_token(raw: &str) -> String {
    static STRIP_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[^a-z0-9_\s-]").expect("strip regex compiles"));
    static WS_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex compiles"));

    let lowered = raw.trim().to_lowercase();
    let stripped = STRIP_RE.replace_all(&lowered, "");
    WS_RE.replace_all(stripped.trim(), "-").to_string()
}

/// Resolves a raw style token into a canonical style.
///
/// Empty input resolves to "standard" unless an explicit bullet count was
/// supplied, in which case the caller clearly asked for bullets. A purely
/// numeric token is always a bullets request with that count.
#[must_use]
pub fn resolve(raw: &str, explicit_bullet_count: Option<u32>) -> ResolvedStyle {
    let normalized = normalize_token(raw);

    if normalized.is_empty() {
        return match explicit_bullet_count {
            Some(n) => bullets(n),
            None => ResolvedStyle {
                id: "standard".to_string(),
                is_custom: false,
                bullet_count: None,
            },
        };
    }

    if normalized.chars().all(|c| c.is_ascii_digit()) {
        let count = normalized.parse::<u32>().ok().filter(|n| *n >= 1);
        return bullets(count.or(explicit_bullet_count).unwrap_or(DEFAULT_BULLET_COUNT));
    }

    let id = STYLE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map_or(normalized.as_str(), |(_, canonical)| *canonical)
        .to_string();

    if id == "bullets" {
        return bullets(explicit_bullet_count.unwrap_or(DEFAULT_BULLET_COUNT));
    }

    let is_custom = !PRESET_STYLES.contains(&id.as_str());
    ResolvedStyle {
        id,
        is_custom,
        bullet_count: None,
    }
}

fn bullets(count: u32) -> ResolvedStyle {
    ResolvedStyle {
        id: "bullets".to_string(),
        is_custom: false,
        bullet_count: Some(count.max(1)),
    }
}

/// Parses a style-shortcut path like `/eli5/https://example.com/article` or
/// `/7/example.com/post` into a style token and the target locator.
///
/// The leading segment must match `^[a-zA-Z0-9_-]+$`; a purely numeric
/// segment is a bullet count. Returns `None` when the path carries no
/// recognizable style prefix or no target remains.
#[must_use]
pub fn parse_shortcut_path(path: &str) -> Option<(StyleRequest, String)> {
    static SEGMENT_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("segment regex compiles"));

    let trimmed = path.trim_start_matches('/');
    let (segment, rest) = trimmed.split_once('/')?;
    if !SEGMENT_RE.is_match(segment) {
        return None;
    }

    let target = percent_decode_str(rest).decode_utf8().ok()?.into_owned();
    let target = target.trim().to_string();
    if target.is_empty() {
        return None;
    }

    Some((
        StyleRequest {
            raw: segment.to_string(),
            bullet_count: None,
        },
        target,
    ))
}
