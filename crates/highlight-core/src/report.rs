//! Plain-text suggestions export and the debug dump

use crate::error::HighlightError;
use serde::Serialize;
use shared_types::{AnalysisResult, Issue};

/// Download name for the suggestions export
pub const SUGGESTIONS_FILENAME: &str = "ats-suggestions.txt";

/// Numbered suggestions, one block per issue.
///
/// ```text
/// 1. [Experience]
/// Issue: Weak verb
/// Suggestion: Use stronger action verb
/// ```
pub fn suggestions_text(issues: &[Issue]) -> String {
    issues
        .iter()
        .enumerate()
        .map(|(i, issue)| {
            format!(
                "{}. [{}]\nIssue: {}\nSuggestion: {}\n",
                i + 1,
                issue.section,
                issue.issue,
                issue.suggestion
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DebugDump<'a> {
    score: f64,
    resume_text: &'a str,
    issues: &'a [Issue],
}

/// Pretty JSON of the score, resume text and issues
pub fn debug_json(result: &AnalysisResult) -> Result<String, HighlightError> {
    let dump = DebugDump {
        score: result.score,
        resume_text: &result.resume_text,
        issues: &result.issues,
    };
    Ok(serde_json::to_string_pretty(&dump)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_suggestions_text_format() {
        let issues = vec![
            Issue::new("Experience", "Weak verb", "Use stronger action verb", "Led"),
            Issue::new("Skills", "Too vague", "List tools", ""),
        ];

        assert_eq!(
            suggestions_text(&issues),
            "1. [Experience]\nIssue: Weak verb\nSuggestion: Use stronger action verb\n\n\
             2. [Skills]\nIssue: Too vague\nSuggestion: List tools\n"
        );
    }

    #[test]
    fn test_suggestions_text_empty() {
        assert_eq!(suggestions_text(&[]), "");
    }

    #[test]
    fn test_debug_json_fields() {
        let result = AnalysisResult::new(
            64.5,
            "Jane Doe",
            vec![Issue::new("Skills", "a", "b", "Jane")],
        );
        let json = debug_json(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["score"], 64.5);
        assert_eq!(value["resumeText"], "Jane Doe");
        assert_eq!(value["issues"][0]["context"], "Jane");
        assert!(json.contains('\n'));
    }
}
