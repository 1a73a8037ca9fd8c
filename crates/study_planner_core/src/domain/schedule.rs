//! crates/study_planner_core/src/domain/schedule.rs
//!
//! A user's weekly schedule: Arabic day name to an ordered list of activity labels.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The seven day names, Sunday first.
pub const DAYS_OF_WEEK: [&str; 7] = [
    "الأحد",
    "الاثنين",
    "الثلاثاء",
    "الأربعاء",
    "الخميس",
    "الجمعة",
    "السبت",
];

pub fn day_name(weekday: Weekday) -> &'static str {
    DAYS_OF_WEEK[weekday.num_days_from_sunday() as usize]
}

/// A day missing from the map has no activities; it is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule(BTreeMap<String, Vec<String>>);

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by seeds and tests.
    pub fn with_day(mut self, day: &str, activities: Vec<String>) -> Self {
        self.0.insert(day.to_string(), activities);
        self
    }

    pub fn day(&self, day: &str) -> &[String] {
        self.0.get(day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn days(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.0
            .iter()
            .map(|(day, activities)| (day.as_str(), activities.as_slice()))
    }

    /// Appends a trimmed label to `day`. Blank labels leave the schedule unchanged.
    pub fn with_activity_added(&self, day: &str, label: &str) -> WeeklySchedule {
        let label = label.trim();
        let mut next = self.clone();
        if !label.is_empty() {
            next.0
                .entry(day.to_string())
                .or_default()
                .push(label.to_string());
        }
        next
    }

    /// Removes the activity at `index` on `day`. An out-of-range index is a no-op.
    pub fn with_activity_removed(&self, day: &str, index: usize) -> WeeklySchedule {
        let mut next = self.clone();
        if let Some(activities) = next.0.get_mut(day) {
            if index < activities.len() {
                activities.remove(index);
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_day_reads_as_empty() {
        let schedule = WeeklySchedule::new();
        assert!(schedule.day("الأحد").is_empty());
        assert_eq!(schedule.days().count(), 0);
    }

    #[test]
    fn add_then_remove_same_index_restores_day() {
        let before = WeeklySchedule::new().with_day("الأحد", vec!["فيزياء".to_string()]);
        let added = before.with_activity_added("الأحد", "  كيمياء ");
        assert_eq!(added.day("الأحد"), ["فيزياء", "كيمياء"]);

        let removed = added.with_activity_removed("الأحد", 1);
        assert_eq!(removed.day("الأحد"), before.day("الأحد"));
        assert_eq!(before.day("الأحد"), ["فيزياء"]);
    }

    #[test]
    fn blank_label_and_bad_index_are_ignored() {
        let schedule = WeeklySchedule::new().with_day("السبت", vec!["عربي".to_string()]);
        assert_eq!(schedule.with_activity_added("السبت", "   "), schedule);
        assert_eq!(schedule.with_activity_removed("السبت", 5), schedule);
        assert_eq!(schedule.with_activity_removed("الجمعة", 0), schedule);
    }

    #[test]
    fn serializes_as_plain_map() {
        let schedule = WeeklySchedule::new().with_day("الأحد", vec!["فيزياء".to_string()]);
        let json = serde_json::to_string(&schedule).unwrap();
        assert_eq!(json, r#"{"الأحد":["فيزياء"]}"#);
    }

    #[test]
    fn day_names_start_on_sunday() {
        assert_eq!(day_name(Weekday::Sun), "الأحد");
        assert_eq!(day_name(Weekday::Sat), "السبت");
    }
}
