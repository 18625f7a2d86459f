use std::io;
use std::sync::LazyLock;

use csv::{Reader, Writer};

use crate::triage::patterns::MatchRule;

use super::table::{self, FilterSummary, TITLE_COLUMN};
use super::CorpusError;

/// Title cues marking housekeeping rather than patient narratives.
const MODERATION_TITLE_CUES: &[&str] = &["megathread", "weekly", "wiki", "moderator", "mod post"];

static MODERATION_TITLE_RULES: LazyLock<Vec<MatchRule>> = LazyLock::new(|| {
    MODERATION_TITLE_CUES
        .iter()
        .copied()
        .map(MatchRule::Literal)
        .collect()
});

/// True when a title marks a moderation or meta post.
pub fn is_moderation_title(title: &str) -> bool {
    let lowered = title.to_lowercase();
    MODERATION_TITLE_RULES
        .iter()
        .any(|rule| rule.is_match(&lowered))
}

/// Drop moderation and meta posts by title, keeping everything else
/// untouched. Rows without a title are kept: only a positive cue match
/// excludes a row.
pub fn strip_moderation_posts<R, W>(
    reader: &mut Reader<R>,
    writer: &mut Writer<W>,
) -> Result<FilterSummary, CorpusError>
where
    R: io::Read,
    W: io::Write,
{
    table::filter_rows(reader, writer, TITLE_COLUMN, |title| {
        !is_moderation_title(title)
    })
}
