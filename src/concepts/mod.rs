//! Static study guide of key concepts
//!
//! Entries are compiled in. Views filter them by category and free-text
//! query and render key points with their lead-in highlighted.

pub mod data;
pub mod models;

pub use data::concepts;
pub use models::{Concept, ConceptCategory, Segment};

/// Entries matching `category` (None for all) whose title or definition
/// contains `query`, case-insensitively. Order is preserved.
pub fn filter<'a>(
    concepts: &'a [Concept],
    category: Option<ConceptCategory>,
    query: &str,
) -> Vec<&'a Concept> {
    let needle = query.to_lowercase();
    concepts
        .iter()
        .filter(|c| category.map_or(true, |cat| c.category == cat))
        .filter(|c| {
            needle.is_empty()
                || c.title.to_lowercase().contains(&needle)
                || c.definition.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Split a key point into plain and highlighted runs.
///
/// Everything through the first `:` is plain, the text after it through the
/// next `.` is highlighted, and the rest is plain again.
pub fn emphasize(key_point: &str) -> Vec<Segment<'_>> {
    let Some(colon) = key_point.find(':') else {
        return vec![Segment {
            text: key_point,
            emphasis: false,
        }];
    };

    let (lead, rest) = key_point.split_at(colon + 1);
    let end = rest.find('.').map(|i| i + 1).unwrap_or(rest.len());
    let (strong, tail) = rest.split_at(end);

    [(lead, false), (strong, true), (tail, false)]
        .into_iter()
        .filter(|(text, _)| !text.is_empty())
        .map(|(text, emphasis)| Segment { text, emphasis })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(found: &[&Concept]) -> Vec<&'static str> {
        found.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_catalog_contents() {
        let all = concepts();
        assert_eq!(all.len(), 10);
        assert_eq!(all[0].id, "mqtt");
        assert_eq!(all[9].id, "deep_sleep");
        assert!(all.iter().all(|c| !c.key_points.is_empty()));
    }

    #[test]
    fn test_filter_by_category() {
        let rtos = filter(concepts(), Some(ConceptCategory::Rtos), "");
        assert_eq!(ids(&rtos), vec!["tasks", "queues", "semaphores"]);
        assert_eq!(filter(concepts(), None, "").len(), 10);
    }

    #[test]
    fn test_filter_by_query_is_case_insensitive() {
        assert_eq!(ids(&filter(concepts(), None, "MUTEX")), vec!["semaphores"]);
        // Matches the definition, not only the title
        assert_eq!(ids(&filter(concepts(), None, "broker")), vec!["mqtt"]);
    }

    #[test]
    fn test_filter_combines_category_and_query() {
        assert!(filter(concepts(), Some(ConceptCategory::Power), "mqtt").is_empty());
        assert_eq!(
            ids(&filter(concepts(), Some(ConceptCategory::Hardware), "dht")),
            vec!["dht"]
        );
    }

    #[test]
    fn test_emphasize_splits_on_colon_and_period() {
        let segments = emphasize("Stack Size: Defined in words (not bytes).");
        assert_eq!(
            segments,
            vec![
                Segment { text: "Stack Size:", emphasis: false },
                Segment { text: " Defined in words (not bytes).", emphasis: true },
            ]
        );

        let segments = emphasize("Power: ~10uA current. More later");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2], Segment { text: " More later", emphasis: false });
    }

    #[test]
    fn test_emphasize_without_colon_is_plain() {
        let segments = emphasize("Reading too fast returns old data.");
        assert_eq!(segments.len(), 1);
        assert!(!segments[0].emphasis);
    }

    #[test]
    fn test_emphasize_without_period_runs_to_end() {
        let segments = emphasize("QoS: none");
        assert_eq!(segments[1], Segment { text: " none", emphasis: true });
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("rtos".parse::<ConceptCategory>().unwrap(), ConceptCategory::Rtos);
        assert_eq!("Power".parse::<ConceptCategory>().unwrap(), ConceptCategory::Power);
        assert!("networking".parse::<ConceptCategory>().is_err());
    }
}
