use std::sync::LazyLock;

use regex::Regex;

/// Closed set of rule-backed diagnosis categories, in resolution priority
/// order. `unspecified` is not a category: it is the resolver's fallback
/// when no rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Undiagnosed,
    Diagnosed,
    Congenital,
    Suspected,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Undiagnosed,
        Category::Diagnosed,
        Category::Congenital,
        Category::Suspected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Undiagnosed => "undiagnosed",
            Category::Diagnosed => "diagnosed",
            Category::Congenital => "congenital",
            Category::Suspected => "suspected",
        }
    }
}

/// One matching rule. Both forms reduce to a boolean predicate over
/// lower-cased text: literals by substring containment, patterns by
/// unanchored regex search.
#[derive(Debug)]
pub enum MatchRule {
    Literal(&'static str),
    Pattern(Regex),
}

impl MatchRule {
    /// `lowered` must already be lower-cased by the caller. Literal needles
    /// are stored lower-cased; patterns embed `(?i)` as well, so a raw-text
    /// caller degrades gracefully instead of silently missing literals.
    pub fn is_match(&self, lowered: &str) -> bool {
        match self {
            MatchRule::Literal(needle) => lowered.contains(needle),
            MatchRule::Pattern(regex) => regex.is_match(lowered),
        }
    }
}

/// Broad "my experience with …" phrasing. Kept for recall: it also fires on
/// posts that describe someone else's condition or never state a diagnosis
/// at all. Named so evaluation runs can drop it via
/// [`RuleLibrary::without_generic_experience`] without touching the
/// resolver.
pub const GENERIC_EXPERIENCE_PATTERN: &str =
    r"(?i)\bmy experience with (a |an |the )?[a-z0-9][\w\W]{0,80}\b";

fn pattern(source: &str) -> MatchRule {
    MatchRule::Pattern(Regex::new(source).expect("Invalid diagnosis rule pattern"))
}

/// Negation phrasings signalling the author still lacks a confirmed
/// diagnosis. The last entry is a broad catch-all for negations the explicit
/// forms miss; its free-text filler is capped at 80 characters so it cannot
/// bridge unrelated sentences in a long post.
fn undiagnosed_rules() -> Vec<MatchRule> {
    vec![
        pattern(r"(?i)\b(still\s+(do\s*not|don['’]t|haven['’]t)\s+have\s+(a|an|the)?\s*(clear\s*)?diagnos(is|ed))\b"),
        pattern(r"(?i)\b(haven'?t been (formally )?diagnosed|not formally diagnosed)\b"),
        pattern(r"(?i)\b(no diagnosis|no clear diagnosis|without a diagnosis|still undiagnosed|undiagnosed|still no diagnosis)\b"),
        pattern(r"(?i)\bdon'?t have (an |a |the )?(official )?diagnos(?:is|ed)\b"),
        pattern(r"(?i)\b(still (do(es)?|did(n't)?)? ?not? have( a| an| the)?( .{0,80})?diagnos(?:is|ed))\b"),
    ]
}

/// Affirmative phrasings: an explicit diagnosis statement, attribution to a
/// named rare condition, or a "diagnosis:"/"dx:" shorthand line.
fn diagnosed_rules(include_generic_experience: bool) -> Vec<MatchRule> {
    let mut rules = vec![pattern(
        r"(?i)\b(diagnosed with|diagnosis of|was diagnosed|were diagnosed|am diagnosed|i'm diagnosed|diagnosed at)\b",
    )];
    if include_generic_experience {
        rules.push(pattern(GENERIC_EXPERIENCE_PATTERN));
    }
    rules.push(pattern(
        r"(?i)\bdue to\s+(a|an|the)\s+(?:\w+\s+){0,6}?(rare|extremely rare|very rare)\s+(?:\w+\s+){0,4}?(condition|disease|disorder|syndrome)\b",
    ));
    rules.push(pattern(r"(?i)\b(diagnosis[:]\s*[\w\- ]+|dx[:]\s*[\w\- ]+)\b"));
    rules
}

fn congenital_rules() -> Vec<MatchRule> {
    vec![pattern(
        r"(?i)\b(from birth|since birth|congenital|since childhood|born with)\b",
    )]
}

fn suspected_rules() -> Vec<MatchRule> {
    vec![pattern(
        r"(?i)\b(suspect(ed)?|possible (?:diagnosis|condition)|probable (?:diagnosis|condition)|i think it might be)\b",
    )]
}

/// Immutable bundle of the per-category rule tables. Construction compiles
/// every pattern; a malformed pattern is a defect in the tables above and
/// aborts then, never at match time.
pub struct RuleLibrary {
    undiagnosed: Vec<MatchRule>,
    diagnosed: Vec<MatchRule>,
    congenital: Vec<MatchRule>,
    suspected: Vec<MatchRule>,
}

static SHARED: LazyLock<RuleLibrary> = LazyLock::new(RuleLibrary::new);

impl RuleLibrary {
    /// Full rule set, including the generic-experience rule.
    pub fn new() -> Self {
        Self::build(true)
    }

    /// Rule set without [`GENERIC_EXPERIENCE_PATTERN`], for precision
    /// measurements against the full set.
    pub fn without_generic_experience() -> Self {
        Self::build(false)
    }

    fn build(include_generic_experience: bool) -> Self {
        RuleLibrary {
            undiagnosed: undiagnosed_rules(),
            diagnosed: diagnosed_rules(include_generic_experience),
            congenital: congenital_rules(),
            suspected: suspected_rules(),
        }
    }

    /// Process-wide instance compiled on first use.
    pub fn shared() -> &'static RuleLibrary {
        &SHARED
    }

    pub fn rules(&self, category: Category) -> &[MatchRule] {
        match category {
            Category::Undiagnosed => &self.undiagnosed,
            Category::Diagnosed => &self.diagnosed,
            Category::Congenital => &self.congenital,
            Category::Suspected => &self.suspected,
        }
    }
}

impl Default for RuleLibrary {
    fn default() -> Self {
        Self::new()
    }
}
