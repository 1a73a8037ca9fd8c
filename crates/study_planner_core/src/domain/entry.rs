//! crates/study_planner_core/src/domain/entry.rs
//!
//! The daily reflection record and the structured analysis that may accompany it.

use crate::domain::profile::GradeLevel;
use crate::domain::schedule::WeeklySchedule;
use crate::ports::PortError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Balance shown before any analysis exists.
const DEFAULT_BALANCE_SCORE: f64 = 75.0;

//=========================================================================================
// Daily Entry
//=========================================================================================

/// One reflection per user per calendar day. Writing again overwrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub reflection: String,
    pub analysis: Option<AnalysisResponse>,
}

/// A calendar date in `YYYY-MM-DD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn parse(value: &str) -> Result<Self, PortError> {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| PortError::InvalidInput(format!("'{}' is not a YYYY-MM-DD date", value)))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

//=========================================================================================
// Analysis Service Contract
//=========================================================================================

/// Everything the analysis service needs to review a day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub reflection: String,
    pub weekly_schedule: WeeklySchedule,
    pub target_day: String,
    pub grade: GradeLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub summary: DaySummary,
    pub web_analysis: WebAnalysis,
    pub motivational_message: MotivationalMessage,
    pub tomorrow_plan: Vec<PlanItem>,
    pub recommended_methods: Vec<StudyMethod>,
    pub research_connections: Vec<ResearchConnection>,
    pub psychological_support: PsychologicalSupport,
    pub quranic_link: QuranicLink,
    /// 0 to 100.
    pub balance_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffortType {
    Mental,
    Emotional,
    Physical,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub accomplishment: String,
    pub effort_type: EffortType,
    pub stress_level: StressLevel,
    pub analysis_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSource {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebAnalysis {
    pub root_cause: String,
    pub suggested_remedy: String,
    #[serde(default)]
    pub sources: Vec<WebSource>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageCategory {
    Religious,
    Scientific,
    Philosophical,
    Wisdom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotivationalMessage {
    pub text: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<MessageCategory>,
}

impl MotivationalMessage {
    /// Shown when neither the service nor a previous analysis has a message.
    pub fn fallback() -> Self {
        Self {
            text: "إن الله لا يضيع أجر من أحسن عملاً.".to_string(),
            source: "سورة الكهف".to_string(),
            category: Some(MessageCategory::Religious),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanItemType {
    Study,
    Break,
    Sleep,
    Prayer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanItem {
    pub time: String,
    pub task: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(rename = "type")]
    pub kind: PlanItemType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyMethod {
    pub subject: String,
    pub method_name: String,
    pub details: String,
    #[serde(default)]
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceStrength {
    Strong,
    Medium,
    Limited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Causal,
    Correlational,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchConnection {
    pub point: String,
    pub source: String,
    pub evidence_strength: EvidenceStrength,
    #[serde(rename = "type")]
    pub kind: ConnectionType,
    pub relevance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsychologicalSupport {
    pub message: String,
    pub technique: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuranicLink {
    pub verse: String,
    pub surah: String,
    pub behavioral_explanation: String,
}

//=========================================================================================
// Dashboard
//=========================================================================================

/// Headline numbers derived from the latest analysis, with neutral defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub balance_score: f64,
    pub stress_level: StressLevel,
    pub effort_type: Option<EffortType>,
}

impl DashboardSummary {
    pub fn from_analysis(analysis: Option<&AnalysisResponse>) -> Self {
        match analysis {
            Some(analysis) => Self {
                balance_score: analysis.balance_score.clamp(0.0, 100.0),
                stress_level: analysis.summary.stress_level,
                effort_type: Some(analysis.summary.effort_type),
            },
            None => Self {
                balance_score: DEFAULT_BALANCE_SCORE,
                stress_level: StressLevel::default(),
                effort_type: None,
            },
        }
    }
}
