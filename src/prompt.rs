//! Prompt construction for the completion API.
//!
//! Maps a resolved style into a system instruction and wraps the content
//! into a user instruction. Every system prompt ends with the same strict
//! output contract so the extractor can rely on the delimiter markers.

use crate::style::{DEFAULT_BULLET_COUNT, ResolvedStyle};

/// Literal markers the model is instructed to wrap its output in.
pub const START_MARKER: &str = "### START ###";
pub const END_MARKER: &str = "### END ###";

/// Shared strict-output directive appended to every system prompt.
fn output_contract() -> String {
    format!(
        "CRITICAL OUTPUT RULES: Respond with the summary content only. \
         Do not add any preamble, introduction, explanation, or closing remarks. \
         Wrap your entire output between the literal markers {START_MARKER} and {END_MARKER}, \
         with nothing before the first marker and nothing after the second."
    )
}

/// Builds the system instruction for a resolved style.
#[must_use]
pub fn system_prompt(style: &ResolvedStyle) -> String {
    let instruction = match style.id.as_str() {
        "standard" => {
            "You are an expert editor. Write a clear, well-organized summary of the \
             provided content in flowing prose. Capture the key facts, arguments, and \
             conclusions faithfully, without editorializing. Aim for one to three short \
             paragraphs."
                .to_string()
        }
        "simple" => {
            "You are a patient writer who makes things easy to read. Summarize the \
             provided content in plain, simple English: short sentences, everyday words, \
             no jargon. Someone skimming on a phone should get it in one pass."
                .to_string()
        }
        "bullets" => {
            let count = style.bullet_count.unwrap_or(DEFAULT_BULLET_COUNT);
            format!(
                "You are a precise analyst. Summarize the provided content as exactly \
                 {count} numbered key points. Each point is one or two sentences, ordered \
                 from most to least important. Produce exactly {count} items, numbered 1 \
                 through {count}, and nothing else."
            )
        }
        "eli5" => {
            "You are explaining to a curious five-year-old. Summarize the provided \
             content using ideas and comparisons a small child would understand. Keep it \
             warm and friendly, avoid any technical terms, and keep it short."
                .to_string()
        }
        "concise" => {
            "You are a ruthless editor. Summarize the provided content in at most two \
             or three sentences. Every word must earn its place; cut everything that is \
             not essential."
                .to_string()
        }
        "tweet" => {
            "You are a social media editor. Summarize the provided content as a single \
             tweet of at most 140 characters. Make it punchy and accurate. Hashtags are \
             allowed only if they fit within the limit."
                .to_string()
        }
        custom => custom_style_instruction(custom),
    };

    format!("{instruction}\n\n{}", output_contract())
}

/// Generic instruction for user-supplied styles with no dedicated template.
///
/// The token is handed to the model to interpret creatively, so arbitrary
/// free-text styles degrade gracefully instead of erroring.
fn custom_style_instruction(token: &str) -> String {
    format!(
        "You are a versatile writer. Summarize the provided content in the style \
         \"{token}\". This style token was supplied by the user, so interpret it \
         creatively as a tone, persona, format, or cultural/linguistic modifier for the \
         summary. Examples of how to interpret a style token: a language or cultural \
         style (e.g. \"british-english\", \"pirate\") changes the voice and idiom; a \
         writing style (e.g. \"hemingway\", \"noir\") changes sentence rhythm and \
         diction; a perspective style (e.g. \"optimist\", \"skeptic\") changes the \
         framing; a business format (e.g. \"memo\", \"press-release\") changes the \
         structure. Whatever the interpretation, the output must remain a faithful \
         summary of the content."
    )
}

/// Builds the user instruction wrapping the content.
///
/// When the content was fetched from a URL, the prompt names the source and
/// warns the model to rely only on the provided text, never on whatever the
/// URL string itself might suggest.
#[must_use]
pub fn user_prompt(content: &str, source_url: Option<&str>) -> String {
    match source_url {
        Some(url) => format!(
            "The following content was fetched from {url}. Summarize it based only on \
             the text provided below. Do not infer, guess, or fabricate anything from \
             the URL itself.\n\n{content}"
        ),
        None => format!("Summarize the following content:\n\n{content}"),
    }
}
