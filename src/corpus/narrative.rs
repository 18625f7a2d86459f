use std::io;
use std::sync::LazyLock;

use csv::{Reader, Writer};

use crate::triage::patterns::MatchRule;

use super::table::{self, FilterSummary, TEXT_COLUMN};
use super::CorpusError;

/// First-person phrasings that mark a post as an illness narrative rather
/// than a question, a link drop, or general chatter.
const EXPERIENCE_TEXT_CUES: &[&str] = &[
    "i was diagnosed",
    "i am diagnosed",
    "my symptoms",
    "my experience",
    "i have been",
    "living with",
    "it started",
    "over the years",
    "i suffer from",
    "i struggle with",
];

static EXPERIENCE_TEXT_RULES: LazyLock<Vec<MatchRule>> = LazyLock::new(|| {
    EXPERIENCE_TEXT_CUES
        .iter()
        .copied()
        .map(MatchRule::Literal)
        .collect()
});

/// True when a body text reads like a first-person experience narrative.
pub fn is_experience_narrative(text: &str) -> bool {
    let lowered = text.to_lowercase();
    EXPERIENCE_TEXT_RULES
        .iter()
        .any(|rule| rule.is_match(&lowered))
}

/// Keep only experience narratives. The cue match is the sole criterion,
/// so rows with empty text (or no text column at all) are dropped.
pub fn keep_experience_posts<R, W>(
    reader: &mut Reader<R>,
    writer: &mut Writer<W>,
) -> Result<FilterSummary, CorpusError>
where
    R: io::Read,
    W: io::Write,
{
    table::filter_rows(reader, writer, TEXT_COLUMN, is_experience_narrative)
}
