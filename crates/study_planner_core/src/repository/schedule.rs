//! crates/study_planner_core/src/repository/schedule.rs

use crate::domain::{UserKey, WeeklySchedule};
use crate::keys::schedule_key;
use crate::ports::LocalStore;
use crate::store;
use crate::sync::RemoteSync;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

const TABLE: &str = "schedules";

/// Owns each user's weekly schedule.
#[derive(Clone)]
pub struct ScheduleRepository {
    local: Arc<dyn LocalStore>,
    remote: RemoteSync,
}

impl ScheduleRepository {
    pub fn new(local: Arc<dyn LocalStore>, remote: RemoteSync) -> Self {
        Self { local, remote }
    }

    /// `None` means the user has no schedule yet.
    pub async fn get_schedule(&self, user: &UserKey) -> Option<WeeklySchedule> {
        let key = schedule_key(user);
        let fetched = self
            .remote
            .fetch(
                &key,
                TABLE,
                |remote| async move { remote.fetch_schedule(user).await },
                |schedule| {
                    store::write_json(self.local.as_ref(), &key, schedule);
                },
            )
            .await;
        if fetched.is_some() {
            return fetched;
        }

        store::read_json(self.local.as_ref(), &key)
    }

    /// Replaces the whole schedule and returns it.
    pub async fn save_schedule(&self, user: &UserKey, schedule: WeeklySchedule) -> WeeklySchedule {
        let key = schedule_key(user);
        let owner = user.clone();
        let snapshot = schedule.clone();
        self.remote.write(
            key.clone(),
            TABLE,
            || {
                store::write_json(self.local.as_ref(), &key, &schedule);
            },
            move |remote| async move {
                remote
                    .upsert_schedule(&owner, &snapshot, Utc::now())
                    .await
            },
        );

        info!(user = %user, "Schedule saved");
        schedule
    }

    pub async fn add_activity(&self, user: &UserKey, day: &str, label: &str) -> WeeklySchedule {
        let current = self.get_schedule(user).await.unwrap_or_default();
        self.save_schedule(user, current.with_activity_added(day, label))
            .await
    }

    pub async fn remove_activity(&self, user: &UserKey, day: &str, index: usize) -> WeeklySchedule {
        let current = self.get_schedule(user).await.unwrap_or_default();
        self.save_schedule(user, current.with_activity_removed(day, index))
            .await
    }
}
