//! Cleanup of raw model output.
//!
//! The model is instructed to wrap its answer in delimiter markers, but
//! real-world output is messy: markers get mangled, preambles sneak in, and
//! closing banners get appended. Extraction is an ordered set of explicit
//! rules so which pattern wins is a documented, unit-testable contract.

use std::sync::LazyLock;

use regex::Regex;

/// A marker wrapped in zero to three hashes on either side, or the bare
/// uppercase word. Word boundaries keep marker substrings inside ordinary
/// words ("RESTART", "WEEKEND") from being read as delimiters.
static START_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:#{1,3}\s*)?\bSTART\b(?:\s*#{1,3})?").expect("start marker regex compiles")
});

static END_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:#{1,3}\s*)?\bEND\b(?:\s*#{1,3})?").expect("end marker regex compiles")
});

/// Residual marker tokens left anywhere in the text: hash-wrapped in any
/// case, or the bare all-caps words. Lowercase "start"/"end" without hashes
/// are ordinary prose and stay untouched.
static RESIDUAL_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:#{1,3}\s*(?:START|END)\s*#{1,3})|\bSTART\b|\bEND\b")
        .expect("residual marker regex compiles")
});

/// Leading "Here is/I've created/Below is…" preamble up to the first colon.
static PREAMBLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:(?:sure|certainly|of course)[,!.]?\s*)?(?:here(?:'s|’s| is| are)|i(?:'ve|’ve| have)? (?:created|written|prepared|summarized|generated)|below is|the following is|this is)\b[^:\n]{0,100}:\s*",
    )
    .expect("preamble regex compiles")
});

/// Leading bolded or headed "<Word> Summary/Content/Text/Analysis" banner.
static LEADING_BANNER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:\*{1,2}|#{1,6}\s*)?\w+\s+(?:summary|content|text|analysis)(?:\*{1,2}|:)?\s*(?:\n|$)",
    )
    .expect("leading banner regex compiles")
});

/// Trailing "End/Conclusion/Summary/That's it"-style closing banner. Only
/// matches on its own line (or as the entire text) so a sentence that merely
/// ends with one of these words survives.
static TRAILING_BANNER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\n|^)\s*(?:\*{1,2}|#{1,6}\s*)?(?:the\s+)?(?:end|conclusion|summary|that(?:'|’)?s\s+(?:it|all))[.!]?(?:\*{1,2})?\s*$",
    )
    .expect("trailing banner regex compiles")
});

static SPACES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("spaces regex compiles"));
static LINE_EDGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ?\n ?").expect("line edge regex compiles"));
static BLANK_LINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank lines regex compiles"));

/// Extracts the clean summary text from raw model output.
///
/// Primary strategy: the span strictly between the delimiter markers. With
/// only a start marker, everything after it; with no markers, the full text.
/// The secondary cleanup always runs afterwards. Non-empty input never
/// produces an empty result: cleanup that removes everything falls back to
/// the trimmed original.
#[must_use]
pub fn extract(raw: &str) -> String {
    let candidate = match START_MARKER_RE.find(raw) {
        Some(start) => match END_MARKER_RE.find_at(raw, start.end()) {
            Some(end) => &raw[start.end()..end.start()],
            None => &raw[start.end()..],
        },
        None => raw,
    };

    let cleaned = cleanup(candidate);
    if cleaned.is_empty() && !raw.trim().is_empty() {
        return raw.trim().to_string();
    }
    cleaned
}

/// Applies the ordered cleanup rules to a fixpoint so a second pass can
/// never change the result (extraction is idempotent by construction).
fn cleanup(text: &str) -> String {
    let mut current = text.to_string();

    for _ in 0..4 {
        let next = cleanup_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }

    current
}

fn cleanup_pass(text: &str) -> String {
    let text = RESIDUAL_MARKER_RE.replace_all(text, "");
    let text = PREAMBLE_RE.replace(&text, "");
    let text = LEADING_BANNER_RE.replace(&text, "");
    let text = TRAILING_BANNER_RE.replace(&text, "");

    let text = SPACES_RE.replace_all(&text, " ");
    let text = LINE_EDGE_RE.replace_all(&text, "\n");
    let text = BLANK_LINES_RE.replace_all(&text, "\n\n");

    text.trim().to_string()
}
