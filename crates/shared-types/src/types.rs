use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Section label the analysis service uses when it could not produce
/// structured issues. The issue's `issue` field then carries the failure text.
pub const ERROR_SENTINEL_SECTION: &str = "AI Response Error";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub section: String, // e.g., "Experience", or ERROR_SENTINEL_SECTION
    #[serde(default, deserialize_with = "string_or_empty")]
    pub issue: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub suggestion: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub context: String, // Verbatim resume substring, may be empty
    #[serde(
        default,
        deserialize_with = "lenient_severity",
        skip_serializing_if = "Option::is_none"
    )]
    pub severity: Option<Severity>,
    #[serde(
        default,
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub resume_section: Option<String>, // Detected structural section, distinct from `section`
    #[serde(
        default,
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub example_fix: Option<String>,
}

impl Issue {
    pub fn new(section: &str, issue: &str, suggestion: &str, context: &str) -> Self {
        Self {
            section: section.to_string(),
            issue: issue.to_string(),
            suggestion: suggestion.to_string(),
            context: context.to_string(),
            ..Default::default()
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_resume_section(mut self, resume_section: &str) -> Self {
        self.resume_section = Some(resume_section.to_string());
        self
    }

    /// True when this record carries an upstream analysis failure
    pub fn is_error_sentinel(&self) -> bool {
        self.section == ERROR_SENTINEL_SECTION
    }

    pub fn has_context(&self) -> bool {
        !self.context.is_empty()
    }

    /// Section identity used to tag and look up rendered regions.
    ///
    /// Prefers the detected `resume_section`; plain issues fall back to their
    /// `section` label. The error sentinel has no location.
    pub fn location_id(&self) -> Option<&str> {
        match self.resume_section.as_deref() {
            Some(section) if !section.is_empty() => Some(section),
            _ if !self.section.is_empty() && !self.is_error_sentinel() => {
                Some(self.section.as_str())
            }
            _ => None,
        }
    }

    /// Category key for grouping: `category`, then `section`
    pub fn category_key(&self) -> Option<&str> {
        match self.category.as_deref() {
            Some(category) if !category.is_empty() => Some(category),
            _ if !self.section.is_empty() => Some(self.section.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Critical,
    Important,
    Minor,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Important, Severity::Minor];

    /// Parse the wire label; anything unrecognized is treated as unrated
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "CRITICAL" => Some(Severity::Critical),
            "IMPORTANT" => Some(Severity::Important),
            "MINOR" => Some(Severity::Minor),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Important => "IMPORTANT",
            Severity::Minor => "MINOR",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "number_or_zero")]
    pub score: f64, // 0-100
    #[serde(default, deserialize_with = "string_or_empty")]
    pub resume_text: String,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub enhanced_issues: Option<Vec<Issue>>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub categorized_issues: Option<BTreeMap<String, Vec<Issue>>>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub detected_sections: Option<BTreeMap<String, String>>,
}

impl AnalysisResult {
    pub fn new(score: f64, resume_text: &str, issues: Vec<Issue>) -> Self {
        Self {
            score,
            resume_text: resume_text.to_string(),
            issues,
            ..Default::default()
        }
    }

    /// First issue carrying the upstream failure sentinel, if any
    pub fn error_issue(&self) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.is_error_sentinel())
    }

    /// Enriched issues when the enhanced variant supplied them
    pub fn display_issues(&self) -> &[Issue] {
        self.enhanced_issues.as_deref().unwrap_or(&self.issues)
    }

    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreBand {
    GreatMatch,
    NeedsImprovement,
    PoorMatch,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreBand::GreatMatch
        } else if score >= 60.0 {
            ScoreBand::NeedsImprovement
        } else {
            ScoreBand::PoorMatch
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::GreatMatch => "Great Match!",
            ScoreBand::NeedsImprovement => "Needs Improvement",
            ScoreBand::PoorMatch => "Poor Match",
        }
    }
}

/// Which analysis request produced a result: (job description?) x (enhanced?)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisVariant {
    ScoreCheck,
    EnhancedScoreCheck,
    JobMatch,
    EnhancedJobMatch,
}

impl AnalysisVariant {
    pub fn from_flags(has_job_description: bool, enhanced: bool) -> Self {
        match (has_job_description, enhanced) {
            (false, false) => AnalysisVariant::ScoreCheck,
            (false, true) => AnalysisVariant::EnhancedScoreCheck,
            (true, false) => AnalysisVariant::JobMatch,
            (true, true) => AnalysisVariant::EnhancedJobMatch,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "score-check" => Some(AnalysisVariant::ScoreCheck),
            "enhanced-score-check" => Some(AnalysisVariant::EnhancedScoreCheck),
            "job-match" => Some(AnalysisVariant::JobMatch),
            "enhanced-job-match" => Some(AnalysisVariant::EnhancedJobMatch),
            _ => None,
        }
    }

    /// Endpoint name under the service's `/api` prefix
    pub fn endpoint(&self) -> &'static str {
        match self {
            AnalysisVariant::ScoreCheck => "score-check",
            AnalysisVariant::EnhancedScoreCheck => "enhanced-score-check",
            AnalysisVariant::JobMatch => "job-match",
            AnalysisVariant::EnhancedJobMatch => "enhanced-job-match",
        }
    }

    pub fn has_job_description(&self) -> bool {
        matches!(
            self,
            AnalysisVariant::JobMatch | AnalysisVariant::EnhancedJobMatch
        )
    }

    pub fn is_enhanced(&self) -> bool {
        matches!(
            self,
            AnalysisVariant::EnhancedScoreCheck | AnalysisVariant::EnhancedJobMatch
        )
    }

    /// Job-match and enhanced surfaces highlight one active issue at a time
    pub fn tracks_single_context(&self) -> bool {
        self.has_job_description() || self.is_enhanced()
    }
}

/// Strings pass through; numbers and booleans are stringified; anything else is empty
fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => text,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Only string values are kept
fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}

/// Numbers or numeric strings; anything else is zero
fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64().unwrap_or_default(),
        Some(Value::String(text)) => text.trim().parse().unwrap_or_default(),
        _ => 0.0,
    })
}

fn lenient_severity<'de, D>(deserializer: D) -> Result<Option<Severity>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(label)) => Severity::parse(&label),
        _ => None,
    })
}

/// Optional sections that fail to parse are dropped instead of failing the result
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(|value| serde_json::from_value(value).ok()))
}
