//! Symptom matching against the knowledge base.
//!
//! An entry matches when its name occurs anywhere in the raw input text as a
//! contiguous substring. Matching is case-sensitive, performs no
//! normalisation, and requires no word boundaries or delimiters — a short
//! generic name can match inside unrelated words. This permissive policy is
//! deliberate: staff paste free-form prose and the catalog names act as
//! keywords.
//!
//! The function is total and pure: for a fixed input and catalog snapshot it
//! always returns the same ordered sequence, and it never fails.

use symrep_types::SymptomEntry;

/// Matches knowledge-base entries against free-text input.
///
/// Returns the entries whose `name` is a substring of `raw_input`, ordered
/// by ascending `display_order`. The sort is stable, so entries with equal
/// `display_order` keep their catalog iteration order.
///
/// Empty input, or input containing no entry name, yields an empty result;
/// that is a valid outcome, not an error.
///
/// The matcher does not deduplicate: should a catalog snapshot ever contain
/// two entries with the same name (prevented upstream by the store's
/// uniqueness check), both would match.
pub fn match_symptoms(raw_input: &str, catalog: &[SymptomEntry]) -> Vec<SymptomEntry> {
    let mut matched: Vec<SymptomEntry> = catalog
        .iter()
        .filter(|entry| raw_input.contains(entry.name.as_str()))
        .cloned()
        .collect();

    // sort_by_key is stable; ties keep catalog order
    matched.sort_by_key(|entry| entry.display_order);
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn entry(name: &str, display_order: u32) -> SymptomEntry {
        SymptomEntry {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: format!("{name}的详细说明"),
            display_order,
        }
    }

    #[test]
    fn test_matches_names_anywhere_in_input() {
        let catalog = vec![entry("头痛", 1), entry("发烧", 2)];
        let matched = match_symptoms("我头痛还发烧", &catalog);
        let names: Vec<&str> = matched.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["头痛", "发烧"]);
    }

    #[test]
    fn test_orders_by_display_order_not_input_order() {
        let catalog = vec![entry("失眠", 5), entry("头痛", 1)];
        let matched = match_symptoms("头痛和失眠", &catalog);
        let names: Vec<&str> = matched.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["头痛", "失眠"]);
    }

    #[test]
    fn test_no_matches_returns_empty() {
        let catalog = vec![entry("头痛", 1), entry("发烧", 2)];
        assert!(match_symptoms("一切正常", &catalog).is_empty());
    }

    #[test]
    fn test_empty_input_returns_empty() {
        let catalog = vec![entry("头痛", 1)];
        assert!(match_symptoms("", &catalog).is_empty());
    }

    #[test]
    fn test_empty_catalog_returns_empty() {
        assert!(match_symptoms("我头痛", &[]).is_empty());
    }

    #[test]
    fn test_substring_match_needs_no_boundaries() {
        // "痛" matches inside "头痛" — the permissive policy, not a bug
        let catalog = vec![entry("痛", 1)];
        let matched = match_symptoms("我有点头痛", &catalog);
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let catalog = vec![entry("Fever", 1)];
        assert!(match_symptoms("i have a fever", &catalog).is_empty());
        assert_eq!(match_symptoms("I have a Fever", &catalog).len(), 1);
    }

    #[test]
    fn test_ordering_invariant_holds() {
        let catalog = vec![
            entry("咳嗽", 7),
            entry("头痛", 1),
            entry("失眠", 5),
            entry("发烧", 2),
        ];
        let matched = match_symptoms("咳嗽头痛失眠发烧", &catalog);
        for pair in matched.windows(2) {
            assert!(pair[0].display_order <= pair[1].display_order);
        }
    }

    #[test]
    fn test_equal_display_order_keeps_catalog_order() {
        let catalog = vec![entry("发烧", 3), entry("头痛", 3), entry("咳嗽", 3)];
        let matched = match_symptoms("头痛发烧咳嗽", &catalog);
        let names: Vec<&str> = matched.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["发烧", "头痛", "咳嗽"]);
    }

    #[test]
    fn test_matching_is_deterministic() {
        let catalog = vec![entry("头痛", 2), entry("发烧", 1), entry("咳嗽", 2)];
        let first = match_symptoms("头痛发烧咳嗽", &catalog);
        for _ in 0..10 {
            assert_eq!(match_symptoms("头痛发烧咳嗽", &catalog), first);
        }
    }

    #[test]
    fn test_every_catalog_entry_included_iff_substring() {
        let catalog = vec![entry("头痛", 1), entry("发烧", 2), entry("失眠", 3)];
        let input = "最近头痛，晚上失眠";
        let matched = match_symptoms(input, &catalog);
        for e in &catalog {
            let in_result = matched.iter().any(|m| m.name == e.name);
            assert_eq!(in_result, input.contains(e.name.as_str()));
        }
    }
}
