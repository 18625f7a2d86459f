pub mod batch;
pub mod classify;
pub mod patterns;
pub mod timeline;

pub use batch::{annotate_table, AnnotateSummary, STATUS_COLUMN, TIMELINE_COLUMN};
pub use classify::{
    category_matches, diagnosis_status, matching_categories, resolve_matches, scan_categories,
    CategoryMatches, DiagnosisStatus,
};
pub use patterns::{Category, MatchRule, RuleLibrary, GENERIC_EXPERIENCE_PATTERN};
pub use timeline::extract_timeline;
