use std::fmt;

use serde::{Deserialize, Serialize};

use super::patterns::{Category, MatchRule, RuleLibrary};

/// Resolved status label for one narrative. Exactly one per text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosisStatus {
    Undiagnosed,
    Diagnosed,
    Congenital,
    Suspected,
    Unspecified,
}

impl DiagnosisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosisStatus::Undiagnosed => "undiagnosed",
            DiagnosisStatus::Diagnosed => "diagnosed",
            DiagnosisStatus::Congenital => "congenital",
            DiagnosisStatus::Suspected => "suspected",
            DiagnosisStatus::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for DiagnosisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which category rule tables fired on one text. Input to the resolver;
/// derived per text, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryMatches {
    pub undiagnosed: bool,
    pub diagnosed: bool,
    pub congenital: bool,
    pub suspected: bool,
}

impl CategoryMatches {
    pub fn get(&self, category: Category) -> bool {
        match category {
            Category::Undiagnosed => self.undiagnosed,
            Category::Diagnosed => self.diagnosed,
            Category::Congenital => self.congenital,
            Category::Suspected => self.suspected,
        }
    }

    /// Fired categories in priority order.
    pub fn fired(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| self.get(*category))
            .collect()
    }
}

fn rules_fire(rules: &[MatchRule], lowered: &str) -> bool {
    rules.iter().any(|rule| rule.is_match(lowered))
}

/// True when any rule of `category` fires on `text`.
pub fn category_matches(library: &RuleLibrary, category: Category, text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    rules_fire(library.rules(category), &text.to_lowercase())
}

/// Evaluate every category rule table against one text. Empty text fires
/// nothing; the text is lower-cased once here so literal and regex rules
/// see the same bytes.
pub fn scan_categories(library: &RuleLibrary, text: &str) -> CategoryMatches {
    if text.is_empty() {
        return CategoryMatches::default();
    }
    let lowered = text.to_lowercase();
    CategoryMatches {
        undiagnosed: rules_fire(library.rules(Category::Undiagnosed), &lowered),
        diagnosed: rules_fire(library.rules(Category::Diagnosed), &lowered),
        congenital: rules_fire(library.rules(Category::Congenital), &lowered),
        suspected: rules_fire(library.rules(Category::Suspected), &lowered),
    }
}

/// Fired categories for one text, in priority order.
pub fn matching_categories(library: &RuleLibrary, text: &str) -> Vec<Category> {
    scan_categories(library, text).fired()
}

/// Collapse a match set to one label. Total over all 16 combinations:
/// undiagnosed > diagnosed > congenital > suspected, nothing fired means
/// `unspecified`.
pub fn resolve_matches(matched: CategoryMatches) -> DiagnosisStatus {
    if matched.undiagnosed && matched.diagnosed {
        // Posts that both claim and deny a diagnosis keep the negation:
        // "was diagnosed with X but still no diagnosis for Y".
        return DiagnosisStatus::Undiagnosed;
    }
    if matched.diagnosed {
        return DiagnosisStatus::Diagnosed;
    }
    if matched.undiagnosed {
        return DiagnosisStatus::Undiagnosed;
    }
    if matched.congenital {
        return DiagnosisStatus::Congenital;
    }
    if matched.suspected {
        return DiagnosisStatus::Suspected;
    }
    DiagnosisStatus::Unspecified
}

/// Classify one narrative against a rule library.
pub fn diagnosis_status(library: &RuleLibrary, text: &str) -> DiagnosisStatus {
    resolve_matches(scan_categories(library, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(text: &str) -> DiagnosisStatus {
        diagnosis_status(RuleLibrary::shared(), text)
    }

    // =================================================================
    // STATUS RESOLUTION: REPRESENTATIVE NARRATIVES
    // =================================================================

    #[test]
    fn negated_diagnosis_is_undiagnosed() {
        assert_eq!(
            status("I still don't have a clear diagnosis and I'm frustrated."),
            DiagnosisStatus::Undiagnosed
        );
        assert_eq!(
            status("Haven't been formally diagnosed despite many tests."),
            DiagnosisStatus::Undiagnosed
        );
        assert_eq!(
            status("I don't have an official diagnosis."),
            DiagnosisStatus::Undiagnosed
        );
        assert_eq!(status("There is no diagnosis yet."), DiagnosisStatus::Undiagnosed);
        assert_eq!(status("Two years in and still undiagnosed."), DiagnosisStatus::Undiagnosed);
    }

    #[test]
    fn experience_opener_is_diagnosed() {
        assert_eq!(
            status("My experience with a rare neuro condition started last year."),
            DiagnosisStatus::Diagnosed
        );
    }

    #[test]
    fn rare_condition_attribution_is_diagnosed() {
        assert_eq!(
            status("Due to an extremely rare multisystem condition, I have chronic fatigue."),
            DiagnosisStatus::Diagnosed
        );
    }

    #[test]
    fn explicit_diagnosis_statements_are_diagnosed() {
        assert_eq!(status("I was diagnosed with EDS in 2019."), DiagnosisStatus::Diagnosed);
        assert_eq!(
            status("Dx: Ehlers-Danlos syndrome, hypermobile type"),
            DiagnosisStatus::Diagnosed
        );
        assert_eq!(
            status("After years of tests came a diagnosis of gastroparesis."),
            DiagnosisStatus::Diagnosed
        );
    }

    #[test]
    fn diagnosed_outranks_congenital() {
        assert_eq!(
            status("Born with a rare connective tissue disorder, diagnosed at age 12, 5 years after first symptoms."),
            DiagnosisStatus::Diagnosed
        );
    }

    #[test]
    fn congenital_phrasing_alone_is_congenital() {
        assert_eq!(status("I've had this since childhood."), DiagnosisStatus::Congenital);
        assert_eq!(status("A congenital heart defect runs in my family."), DiagnosisStatus::Congenital);
    }

    #[test]
    fn suspicion_phrasing_alone_is_suspected() {
        assert_eq!(
            status("My doctor suspected lupus at first."),
            DiagnosisStatus::Suspected
        );
        assert_eq!(
            status("A possible condition was mentioned at the last visit."),
            DiagnosisStatus::Suspected
        );
        assert_eq!(
            status("I think it might be autoimmune."),
            DiagnosisStatus::Suspected
        );
    }

    #[test]
    fn third_person_present_suspects_does_not_fire() {
        // "suspects" never matches: the rule covers "suspect"/"suspected" as
        // whole words only.
        assert_eq!(status("The doctor suspects lupus."), DiagnosisStatus::Unspecified);
    }

    #[test]
    fn plain_chatter_is_unspecified() {
        assert_eq!(
            status("Thanks everyone for the kind words last week."),
            DiagnosisStatus::Unspecified
        );
    }

    #[test]
    fn empty_text_is_unspecified() {
        assert_eq!(status(""), DiagnosisStatus::Unspecified);
        assert_eq!(scan_categories(RuleLibrary::shared(), ""), CategoryMatches::default());
        assert!(!category_matches(RuleLibrary::shared(), Category::Diagnosed, ""));
    }

    #[test]
    fn single_category_query_agrees_with_scan() {
        let library = RuleLibrary::shared();
        let text = "I was diagnosed with EDS but still no diagnosis for the tremors.";
        let matched = scan_categories(library, text);
        for category in Category::ALL {
            assert_eq!(
                category_matches(library, category, text),
                matched.get(category),
                "disagreement for {:?}",
                category
            );
        }
    }

    #[test]
    fn classification_ignores_case() {
        assert_eq!(status("DIAGNOSED WITH a rare disease"), DiagnosisStatus::Diagnosed);
        assert_eq!(status("Still UNDIAGNOSED after all this"), DiagnosisStatus::Undiagnosed);
    }

    // =================================================================
    // TIE-BREAK AND RESOLVER TOTALITY
    // =================================================================

    #[test]
    fn negation_wins_when_both_families_fire() {
        let text = "I was diagnosed with EDS but still no diagnosis for the tremors.";
        let matched = scan_categories(RuleLibrary::shared(), text);
        assert!(matched.undiagnosed);
        assert!(matched.diagnosed);
        assert_eq!(resolve_matches(matched), DiagnosisStatus::Undiagnosed);
    }

    #[test]
    fn resolver_is_total_over_match_sets() {
        let combos = [
            // (undiagnosed, diagnosed, congenital, suspected) -> expected
            ((false, false, false, false), DiagnosisStatus::Unspecified),
            ((true, false, false, false), DiagnosisStatus::Undiagnosed),
            ((false, true, false, false), DiagnosisStatus::Diagnosed),
            ((false, false, true, false), DiagnosisStatus::Congenital),
            ((false, false, false, true), DiagnosisStatus::Suspected),
            ((true, true, false, false), DiagnosisStatus::Undiagnosed),
            ((true, true, true, true), DiagnosisStatus::Undiagnosed),
            ((false, true, true, true), DiagnosisStatus::Diagnosed),
            ((false, false, true, true), DiagnosisStatus::Congenital),
            ((true, false, true, true), DiagnosisStatus::Undiagnosed),
        ];
        for ((undiagnosed, diagnosed, congenital, suspected), expected) in combos {
            let matched = CategoryMatches {
                undiagnosed,
                diagnosed,
                congenital,
                suspected,
            };
            assert_eq!(resolve_matches(matched), expected, "combo {:?}", matched);
        }
    }

    #[test]
    fn fired_lists_categories_in_priority_order() {
        let text = "Born with this, but I was diagnosed with POTS last spring.";
        let fired = matching_categories(RuleLibrary::shared(), text);
        assert_eq!(fired, vec![Category::Diagnosed, Category::Congenital]);
    }

    // =================================================================
    // GENERIC-EXPERIENCE TOGGLE
    // =================================================================

    #[test]
    fn trimmed_library_drops_experience_opener_only() {
        let trimmed = RuleLibrary::without_generic_experience();
        let opener = "My experience with a rare neuro condition started last year.";
        assert_eq!(diagnosis_status(&trimmed, opener), DiagnosisStatus::Unspecified);
        // Explicit statements are untouched.
        assert_eq!(
            diagnosis_status(&trimmed, "I was diagnosed with EDS in 2019."),
            DiagnosisStatus::Diagnosed
        );
    }

    #[test]
    fn status_labels_round_trip_display() {
        for status in [
            DiagnosisStatus::Undiagnosed,
            DiagnosisStatus::Diagnosed,
            DiagnosisStatus::Congenital,
            DiagnosisStatus::Suspected,
            DiagnosisStatus::Unspecified,
        ] {
            assert_eq!(status.to_string(), status.as_str());
        }
    }
}
