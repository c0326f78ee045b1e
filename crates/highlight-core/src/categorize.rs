//! Read-only grouping of issues for the results tabs
//!
//! [`IssueCategories::project`] borrows the result and never reorders the
//! source list: within every group, issues appear in their original order.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use shared_types::{AnalysisResult, Issue, Severity};
use std::collections::BTreeMap;
use tracing::debug;

/// Bucket for issues with neither a category nor a section
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Bucket for issues whose `resumeSection` is missing or not detected
pub const UNASSIGNED_SECTION: &str = "unassigned";

/// Category slugs with a dedicated badge style
pub const KNOWN_BADGES: [&str; 11] = [
    "formatting",
    "keywords",
    "atscompatibility",
    "contactinfo",
    "experience",
    "skills",
    "education",
    "achievements",
    "contentquality",
    "jobmatch",
    "grammar",
];

/// Number of category groups the accordion opens initially
const DEFAULT_EXPANDED_GROUPS: usize = 2;

lazy_static! {
    /// Lower-to-upper case transition inside a camelCase word
    static ref CAMEL_BOUNDARY: Regex = Regex::new(r"([a-z0-9])([A-Z])").unwrap();

    /// Separators collapsed to a single space
    static ref SEPARATORS: Regex = Regex::new(r"[\s_\-]+").unwrap();

    /// Everything that is not part of a badge slug
    static ref NON_SLUG: Regex = Regex::new(r"[^a-z0-9]").unwrap();
}

/// `contactInfo` -> `Contact Info`, `ats_compatibility` -> `Ats Compatibility`
pub fn format_category_name(key: &str) -> String {
    let spaced = CAMEL_BOUNDARY.replace_all(key, "$1 $2");
    let spaced = SEPARATORS.replace_all(&spaced, " ");

    spaced
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Badge style for a category key; unknown categories get `other`
pub fn badge_variant(key: &str) -> &'static str {
    let slug = NON_SLUG.replace_all(&key.to_lowercase(), "").into_owned();
    KNOWN_BADGES
        .iter()
        .find(|known| **known == slug)
        .copied()
        .unwrap_or("other")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup<'a> {
    pub key: String,
    pub display_name: String,
    pub badge_variant: &'static str,
    pub issues: Vec<&'a Issue>,
}

impl<'a> CategoryGroup<'a> {
    fn new(key: &str, issues: Vec<&'a Issue>) -> Self {
        Self {
            key: key.to_string(),
            display_name: format_category_name(key),
            badge_variant: badge_variant(key),
            issues,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityGroup<'a> {
    /// `None` is the unrated bucket
    pub severity: Option<Severity>,
    pub label: &'static str,
    pub issues: Vec<&'a Issue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionGroup<'a> {
    pub section: String,
    pub issues: Vec<&'a Issue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCategories<'a> {
    pub by_category: Vec<CategoryGroup<'a>>,
    pub by_severity: Vec<SeverityGroup<'a>>,
    pub by_section: Vec<SectionGroup<'a>>,
}

impl<'a> IssueCategories<'a> {
    pub fn project(result: &'a AnalysisResult) -> Self {
        let source = result.display_issues();

        let by_category = match &result.categorized_issues {
            Some(supplied) => supplied
                .iter()
                .filter(|(_, issues)| !issues.is_empty())
                .map(|(key, issues)| CategoryGroup::new(key, issues.iter().collect()))
                .collect(),
            None => group_by_category(source),
        };

        let categories = Self {
            by_category,
            by_severity: group_by_severity(source),
            by_section: group_by_section(source, result.detected_sections.as_ref()),
        };

        debug!(
            issues = source.len(),
            categories = categories.by_category.len(),
            sections = categories.by_section.len(),
            "projected issue categories"
        );
        categories
    }

    /// Issues for the "Critical" tab
    pub fn critical(&self) -> Vec<&'a Issue> {
        self.by_severity
            .iter()
            .find(|group| group.severity == Some(Severity::Critical))
            .map(|group| group.issues.clone())
            .unwrap_or_default()
    }

    /// Category keys the accordion opens on first render
    pub fn default_expanded(&self) -> Vec<&str> {
        self.by_category
            .iter()
            .take(DEFAULT_EXPANDED_GROUPS)
            .map(|group| group.key.as_str())
            .collect()
    }
}

fn group_by_category(issues: &[Issue]) -> Vec<CategoryGroup<'_>> {
    let mut groups: BTreeMap<&str, Vec<&Issue>> = BTreeMap::new();
    for issue in issues {
        let key = issue.category_key().unwrap_or(UNCATEGORIZED);
        groups.entry(key).or_default().push(issue);
    }

    groups
        .into_iter()
        .map(|(key, issues)| CategoryGroup::new(key, issues))
        .collect()
}

fn group_by_severity(issues: &[Issue]) -> Vec<SeverityGroup<'_>> {
    let mut groups: Vec<SeverityGroup<'_>> = Severity::ALL
        .iter()
        .map(|severity| SeverityGroup {
            severity: Some(*severity),
            label: severity.label(),
            issues: issues
                .iter()
                .filter(|issue| issue.severity == Some(*severity))
                .collect(),
        })
        .collect();

    let unrated: Vec<&Issue> = issues.iter().filter(|i| i.severity.is_none()).collect();
    if !unrated.is_empty() {
        groups.push(SeverityGroup {
            severity: None,
            label: "UNRATED",
            issues: unrated,
        });
    }

    groups
}

fn group_by_section<'a>(
    issues: &'a [Issue],
    detected: Option<&BTreeMap<String, String>>,
) -> Vec<SectionGroup<'a>> {
    let mut groups: Vec<SectionGroup<'a>> = detected
        .into_iter()
        .flat_map(|sections| sections.keys())
        .map(|section| SectionGroup {
            section: section.clone(),
            issues: issues
                .iter()
                .filter(|issue| issue.resume_section.as_deref() == Some(section.as_str()))
                .collect(),
        })
        .collect();

    let unassigned: Vec<&Issue> = issues
        .iter()
        .filter(|issue| match (issue.resume_section.as_deref(), detected) {
            (Some(section), Some(sections)) => !sections.contains_key(section),
            _ => true,
        })
        .collect();

    if !unassigned.is_empty() {
        groups.push(SectionGroup {
            section: UNASSIGNED_SECTION.to_string(),
            issues: unassigned,
        });
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result() -> AnalysisResult {
        AnalysisResult::new(
            72.0,
            "resume",
            vec![
                Issue::new("Skills", "a", "a", "")
                    .with_category("keywords")
                    .with_severity(Severity::Critical)
                    .with_resume_section("Skills"),
                Issue::new("Experience", "b", "b", "").with_severity(Severity::Minor),
                Issue::new("", "c", "c", "").with_resume_section("Hobbies"),
                Issue::new("Formatting", "d", "d", "")
                    .with_category("contactInfo")
                    .with_severity(Severity::Critical),
                Issue::new("Skills", "e", "e", "").with_category("keywords"),
            ],
        )
    }

    fn texts(issues: &[&Issue]) -> Vec<String> {
        issues.iter().map(|i| i.issue.clone()).collect()
    }

    #[test]
    fn test_format_category_name() {
        assert_eq!(format_category_name("contactInfo"), "Contact Info");
        assert_eq!(format_category_name("atsCompatibility"), "Ats Compatibility");
        assert_eq!(format_category_name("keywords"), "Keywords");
        assert_eq!(format_category_name("content_quality"), "Content Quality");
        assert_eq!(format_category_name("Uncategorized"), "Uncategorized");
        assert_eq!(format_category_name(""), "");
    }

    #[test]
    fn test_badge_variant() {
        assert_eq!(badge_variant("contactInfo"), "contactinfo");
        assert_eq!(badge_variant("ATS Compatibility"), "atscompatibility");
        assert_eq!(badge_variant("Experience"), "experience");
        assert_eq!(badge_variant("Leadership"), "other");
    }

    #[test]
    fn test_groups_by_category_then_section() {
        let result = result();
        let categories = IssueCategories::project(&result);

        let keys: Vec<&str> = categories.by_category.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Experience", "Uncategorized", "contactInfo", "keywords"]);

        let keywords = &categories.by_category[3];
        assert_eq!(texts(&keywords.issues), vec!["a", "e"]);
        assert_eq!(keywords.display_name, "Keywords");
        assert_eq!(keywords.badge_variant, "keywords");
    }

    #[test]
    fn test_supplied_categories_take_precedence() {
        let mut result = result();
        let mut supplied = BTreeMap::new();
        supplied.insert("grammar".to_string(), vec![Issue::new("S", "g", "g", "")]);
        supplied.insert("empty".to_string(), Vec::new());
        result.categorized_issues = Some(supplied);

        let categories = IssueCategories::project(&result);
        assert_eq!(categories.by_category.len(), 1);
        assert_eq!(categories.by_category[0].key, "grammar");
        assert_eq!(categories.by_category[0].badge_variant, "grammar");
    }

    #[test]
    fn test_severity_groups_in_rank_order() {
        let result = result();
        let categories = IssueCategories::project(&result);

        let labels: Vec<&str> = categories.by_severity.iter().map(|g| g.label).collect();
        assert_eq!(labels, vec!["CRITICAL", "IMPORTANT", "MINOR", "UNRATED"]);
        assert_eq!(texts(&categories.critical()), vec!["a", "d"]);
        assert!(categories.by_severity[1].issues.is_empty());
        assert_eq!(texts(&categories.by_severity[3].issues), vec!["c", "e"]);
    }

    #[test]
    fn test_section_groups_follow_detected_sections() {
        let mut result = result();
        let mut detected = BTreeMap::new();
        detected.insert("Skills".to_string(), "Rust, Go".to_string());
        detected.insert("Education".to_string(), "BSc".to_string());
        result.detected_sections = Some(detected);

        let categories = IssueCategories::project(&result);
        let sections: Vec<&str> = categories.by_section.iter().map(|g| g.section.as_str()).collect();
        assert_eq!(sections, vec!["Education", "Skills", UNASSIGNED_SECTION]);

        assert!(categories.by_section[0].issues.is_empty());
        assert_eq!(texts(&categories.by_section[1].issues), vec!["a"]);
        assert_eq!(texts(&categories.by_section[2].issues), vec!["b", "c", "d", "e"]);
    }

    #[test]
    fn test_without_detected_sections_everything_is_unassigned() {
        let result = result();
        let categories = IssueCategories::project(&result);

        assert_eq!(categories.by_section.len(), 1);
        assert_eq!(categories.by_section[0].issues.len(), 5);
    }

    #[test]
    fn test_enhanced_issues_are_the_source() {
        let mut result = result();
        result.enhanced_issues = Some(vec![Issue::new("Skills", "x", "x", "").with_category("skills")]);

        let categories = IssueCategories::project(&result);
        assert_eq!(categories.by_category.len(), 1);
        assert_eq!(categories.by_category[0].key, "skills");
    }

    #[test]
    fn test_default_expanded_is_first_two() {
        let result = result();
        let categories = IssueCategories::project(&result);
        assert_eq!(categories.default_expanded(), vec!["Experience", "Uncategorized"]);

        let empty = AnalysisResult::default();
        assert!(IssueCategories::project(&empty).default_expanded().is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let result = result();
        let json = serde_json::to_value(IssueCategories::project(&result)).unwrap();
        assert_eq!(json["byCategory"][2]["displayName"], "Contact Info");
        assert_eq!(json["bySeverity"][0]["severity"], "CRITICAL");
        assert!(json["bySeverity"][3]["severity"].is_null());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn issue_strategy() -> impl Strategy<Value = Issue> {
        (
            "[a-z]{1,6}",
            prop::option::of(prop::sample::select(vec!["keywords", "skills", "grammar"])),
            prop::option::of(prop::sample::select(Severity::ALL.to_vec())),
        )
            .prop_map(|(text, category, severity)| {
                let mut issue = Issue::new("Section", &text, "s", "");
                issue.category = category.map(str::to_string);
                issue.severity = severity;
                issue
            })
    }

    proptest! {
        /// Property: every grouping partitions the source list without reordering it
        #[test]
        fn groupings_preserve_source_order(issues in prop::collection::vec(issue_strategy(), 0..12)) {
            let result = AnalysisResult::new(50.0, "", issues);
            let categories = IssueCategories::project(&result);
            let position = |issue: &Issue| result.issues.iter().position(|i| std::ptr::eq(i, issue));

            let mut total = 0;
            for group in &categories.by_category {
                let positions: Vec<Option<usize>> = group.issues.iter().map(|&i| position(i)).collect();
                prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
                total += group.issues.len();
            }
            prop_assert_eq!(total, result.issues.len());

            let severity_total: usize = categories.by_severity.iter().map(|g| g.issues.len()).sum();
            prop_assert_eq!(severity_total, result.issues.len());
        }
    }
}
