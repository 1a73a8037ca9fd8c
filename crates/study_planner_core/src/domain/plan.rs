//! crates/study_planner_core/src/domain/plan.rs
//!
//! The study plan document: five fixed subjects, each holding either a flat
//! task list or a list of titled sections.

use crate::ports::PortError;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Sort key for tasks whose duration carries no leading number ("أسبوع قادم").
const UNKNOWN_DURATION: u32 = 9999;

//=========================================================================================
// Subjects and Tasks
//=========================================================================================

/// The closed set of subjects in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectId {
    English,
    Arabic,
    Chemistry,
    Physics,
    Math,
}

impl SubjectId {
    pub const ALL: [SubjectId; 5] = [
        SubjectId::English,
        SubjectId::Arabic,
        SubjectId::Chemistry,
        SubjectId::Physics,
        SubjectId::Math,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SubjectId::English => "english",
            SubjectId::Arabic => "arabic",
            SubjectId::Chemistry => "chemistry",
            SubjectId::Physics => "physics",
            SubjectId::Math => "math",
        }
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubjectId {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubjectId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PortError::InvalidInput(format!("Unknown subject '{}'", s)))
    }
}

/// A single study task. Only `is_completed` ever changes at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Free text, e.g. "30 دقيقة".
    pub duration: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default)]
    pub feeling_after: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notebook_lm_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_exams_link: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Task {
    /// The leading integer of the free-text duration, if any.
    pub fn duration_minutes(&self) -> Option<u32> {
        let digits: String = self
            .duration
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub tasks: Vec<Task>,
}

/// How a subject's tasks are laid out.
///
/// On the wire this is either a `tasks` key or a `sections` key on the
/// subject object. A document carrying both decodes as `Flat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubjectTasks {
    Flat { tasks: Vec<Task> },
    Sectioned { sections: Vec<Section> },
}

impl SubjectTasks {
    /// Every task in display order, sections flattened.
    pub fn iter(&self) -> impl Iterator<Item = &Task> + '_ {
        let (flat, sections): (&[Task], &[Section]) = match self {
            SubjectTasks::Flat { tasks } => (tasks.as_slice(), &[]),
            SubjectTasks::Sectioned { sections } => (&[], sections.as_slice()),
        };
        flat.iter()
            .chain(sections.iter().flat_map(|section| section.tasks.iter()))
    }

    /// Current status of `task_id`. Among sections the last match wins.
    pub fn status_of(&self, task_id: &str) -> Option<bool> {
        match self {
            SubjectTasks::Flat { tasks } => find_in(tasks, task_id).map(|t| t.is_completed),
            SubjectTasks::Sectioned { sections } => sections
                .iter()
                .filter_map(|section| find_in(&section.tasks, task_id))
                .last()
                .map(|t| t.is_completed),
        }
    }

    /// Sets the first match in the flat list, or the first match in every
    /// section. Returns whether any task was touched.
    fn set_status(&mut self, task_id: &str, completed: bool) -> bool {
        match self {
            SubjectTasks::Flat { tasks } => match tasks.iter_mut().find(|t| t.id == task_id) {
                Some(task) => {
                    task.is_completed = completed;
                    true
                }
                None => false,
            },
            SubjectTasks::Sectioned { sections } => {
                let mut touched = false;
                for section in sections.iter_mut() {
                    if let Some(task) = section.tasks.iter_mut().find(|t| t.id == task_id) {
                        task.is_completed = completed;
                        touched = true;
                    }
                }
                touched
            }
        }
    }
}

fn find_in<'a>(tasks: &'a [Task], task_id: &str) -> Option<&'a Task> {
    tasks.iter().find(|t| t.id == task_id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectData {
    pub id: SubjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub accent_color: String,
    #[serde(default)]
    pub hero_image: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub tasks: SubjectTasks,
}

impl SubjectData {
    /// Groups tasks for display. Sections left empty by the filter are hidden;
    /// a flat subject always yields exactly one untitled group.
    pub fn task_groups(&self, filter: TaskFilter, sort: TaskSort) -> Vec<TaskGroup> {
        match &self.tasks {
            SubjectTasks::Flat { tasks } => vec![TaskGroup {
                title: None,
                tasks: arrange(tasks, filter, sort),
            }],
            SubjectTasks::Sectioned { sections } => sections
                .iter()
                .map(|section| TaskGroup {
                    title: Some(section.title.clone()),
                    tasks: arrange(&section.tasks, filter, sort),
                })
                .filter(|group| !group.tasks.is_empty())
                .collect(),
        }
    }
}

//=========================================================================================
// Task Listing
//=========================================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl TaskFilter {
    fn accepts(self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Completed => task.is_completed,
            TaskFilter::Incomplete => !task.is_completed,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskSort {
    #[default]
    Default,
    Duration,
    Title,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskGroup {
    pub title: Option<String>,
    pub tasks: Vec<Task>,
}

fn arrange(tasks: &[Task], filter: TaskFilter, sort: TaskSort) -> Vec<Task> {
    let mut out: Vec<Task> = tasks.iter().filter(|t| filter.accepts(t)).cloned().collect();
    match sort {
        TaskSort::Default => {}
        TaskSort::Title => out.sort_by(|a, b| a.title.cmp(&b.title)),
        TaskSort::Duration => {
            out.sort_by_key(|t| t.duration_minutes().unwrap_or(UNKNOWN_DURATION))
        }
    }
    out
}

//=========================================================================================
// The Plan Document
//=========================================================================================

/// Stored as a bare object keyed by subject id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudyPlan {
    pub subjects: BTreeMap<SubjectId, SubjectData>,
}

/// Overall completion across every subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
    pub percent: u8,
}

impl StudyPlan {
    pub fn subject(&self, id: SubjectId) -> Option<&SubjectData> {
        self.subjects.get(&id)
    }

    pub fn task_status(&self, subject: SubjectId, task_id: &str) -> Option<bool> {
        self.subject(subject)
            .and_then(|data| data.tasks.status_of(task_id))
    }

    /// Returns a new plan with one task's status set. The receiver is left
    /// untouched; an unknown subject or task yields an identical copy.
    pub fn with_task_status(&self, subject: SubjectId, task_id: &str, completed: bool) -> StudyPlan {
        let mut next = self.clone();
        if let Some(data) = next.subjects.get_mut(&subject) {
            data.tasks.set_status(task_id, completed);
        }
        next
    }

    pub fn progress(&self) -> Progress {
        let (total, completed) = self
            .subjects
            .values()
            .flat_map(|subject| subject.tasks.iter())
            .fold((0usize, 0usize), |(total, done), task| {
                (total + 1, done + usize::from(task.is_completed))
            });
        let percent = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u8
        };
        Progress {
            total,
            completed,
            percent,
        }
    }
}

//=========================================================================================
// Today's Focus
//=========================================================================================

/// The subject the weekly rhythm puts first on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TodaysFocus {
    pub subject: SubjectId,
    pub note: &'static str,
}

pub fn todays_focus(weekday: Weekday) -> TodaysFocus {
    let (subject, note) = match weekday {
        Weekday::Sat => (SubjectId::English, "مراجعة خفيفة + استيعاب الدرس الجديد"),
        Weekday::Sun => (SubjectId::Chemistry, "مذاكرة درس الكيمياء الجديد"),
        Weekday::Mon => (SubjectId::Math, "الجديد حسب الدرس"),
        Weekday::Tue => (SubjectId::Arabic, "مراجعة + درس العربي الجديد"),
        Weekday::Wed => (SubjectId::Physics, "الجديد أولاً"),
        Weekday::Thu => (SubjectId::Math, "الجديد حسب الدرس"),
        Weekday::Fri => (SubjectId::Physics, "الجديد أولاً (مراجعة الفصل الرابع)"),
    };
    TodaysFocus { subject, note }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(id: &str, title: &str, duration: &str, done: bool) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            duration: duration.to_string(),
            content: String::new(),
            method: None,
            feeling_after: String::new(),
            notebook_lm_link: None,
            past_exams_link: None,
            is_completed: done,
            image_url: None,
        }
    }

    fn sectioned(sections: Vec<(&str, Vec<Task>)>) -> SubjectData {
        SubjectData {
            id: SubjectId::Physics,
            name: "الفيزياء".to_string(),
            color: String::new(),
            accent_color: String::new(),
            hero_image: String::new(),
            description: String::new(),
            tasks: SubjectTasks::Sectioned {
                sections: sections
                    .into_iter()
                    .map(|(title, tasks)| Section {
                        title: title.to_string(),
                        tasks,
                    })
                    .collect(),
            },
        }
    }

    #[test]
    fn subject_json_uses_tasks_or_sections_key() {
        let flat = r#"{"id":"english","name":"E","tasks":[{"id":"eng_1","title":"t","duration":"30 دقيقة","content":"c","feelingAfter":"f","isCompleted":true}]}"#;
        let data: SubjectData = serde_json::from_str(flat).unwrap();
        assert!(matches!(data.tasks, SubjectTasks::Flat { ref tasks } if tasks.len() == 1 && tasks[0].is_completed));

        let nested = r#"{"id":"arabic","sections":[{"title":"s","tasks":[]}]}"#;
        let data: SubjectData = serde_json::from_str(nested).unwrap();
        assert!(matches!(data.tasks, SubjectTasks::Sectioned { ref sections } if sections.len() == 1));

        let encoded = serde_json::to_value(&data).unwrap();
        assert!(encoded.get("sections").is_some());
        assert!(encoded.get("tasks").is_none());
    }

    #[test]
    fn subject_with_both_keys_decodes_as_flat() {
        let both = r#"{"id":"math","tasks":[],"sections":[{"title":"s","tasks":[]}]}"#;
        let data: SubjectData = serde_json::from_str(both).unwrap();
        assert!(matches!(data.tasks, SubjectTasks::Flat { .. }));
    }

    #[test]
    fn plan_json_is_keyed_by_subject_id() {
        let mut subjects = BTreeMap::new();
        subjects.insert(SubjectId::Physics, sectioned(vec![]));
        let encoded = serde_json::to_value(StudyPlan { subjects }).unwrap();
        assert!(encoded.get("physics").is_some());
        assert!(encoded.get("subjects").is_none());
    }

    #[test]
    fn subject_id_parses_case_insensitively() {
        assert_eq!("Physics".parse::<SubjectId>().unwrap(), SubjectId::Physics);
        assert!("biology".parse::<SubjectId>().is_err());
    }

    #[test]
    fn duration_uses_leading_integer() {
        assert_eq!(task("a", "t", "30 دقيقة", false).duration_minutes(), Some(30));
        assert_eq!(task("a", "t", "أسبوع قادم", false).duration_minutes(), None);
    }

    #[test]
    fn status_lookup_prefers_last_section_match() {
        let data = sectioned(vec![
            ("one", vec![task("dup", "a", "1", false)]),
            ("two", vec![task("dup", "b", "1", true)]),
        ]);
        assert_eq!(data.tasks.status_of("dup"), Some(true));
        assert_eq!(data.tasks.status_of("missing"), None);
    }

    #[test]
    fn task_groups_hide_sections_emptied_by_filter() {
        let data = sectioned(vec![
            ("one", vec![task("a", "a", "10", true)]),
            ("two", vec![task("b", "b", "10", false)]),
        ]);
        let groups = data.task_groups(TaskFilter::Completed, TaskSort::Default);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title.as_deref(), Some("one"));
    }

    #[test]
    fn duration_sort_puts_unknown_last() {
        let data = SubjectData {
            tasks: SubjectTasks::Flat {
                tasks: vec![
                    task("w", "w", "أسبوع قادم", false),
                    task("l", "l", "40 دقيقة", false),
                    task("s", "s", "20 دقيقة", false),
                ],
            },
            ..sectioned(vec![])
        };
        let groups = data.task_groups(TaskFilter::All, TaskSort::Duration);
        let order: Vec<&str> = groups[0].tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, vec!["s", "l", "w"]);
    }

    #[test]
    fn progress_rounds_percentage() {
        let mut subjects = BTreeMap::new();
        subjects.insert(
            SubjectId::Physics,
            sectioned(vec![(
                "one",
                vec![
                    task("a", "a", "1", true),
                    task("b", "b", "1", false),
                    task("c", "c", "1", false),
                ],
            )]),
        );
        let plan = StudyPlan { subjects };
        assert_eq!(
            plan.progress(),
            Progress {
                total: 3,
                completed: 1,
                percent: 33
            }
        );

        let empty = StudyPlan {
            subjects: BTreeMap::new(),
        };
        assert_eq!(empty.progress().percent, 0);
    }

    #[test]
    fn focus_follows_weekly_rhythm() {
        assert_eq!(todays_focus(Weekday::Sat).subject, SubjectId::English);
        assert_eq!(todays_focus(Weekday::Tue).subject, SubjectId::Arabic);
        assert_eq!(todays_focus(Weekday::Fri).subject, SubjectId::Physics);
    }
}
