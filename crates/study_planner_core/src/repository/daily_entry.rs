//! crates/study_planner_core/src/repository/daily_entry.rs

use crate::domain::{AnalysisResponse, DailyEntry, DateKey, UserKey};
use crate::keys::{analysis_key, reflection_key};
use crate::ports::LocalStore;
use crate::store;
use crate::sync::RemoteSync;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::info;

const TABLE: &str = "daily_entries";

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Owns each user's per-day reflection and analysis.
///
/// Locally only the latest entry is kept (one reflection key and one analysis
/// key per user); the per-date history lives in the remote store. Writes are
/// tracked against that single local slot, whatever the date.
#[derive(Clone)]
pub struct DailyEntryRepository {
    local: Arc<dyn LocalStore>,
    remote: RemoteSync,
    today: fn() -> NaiveDate,
}

impl DailyEntryRepository {
    pub fn new(local: Arc<dyn LocalStore>, remote: RemoteSync) -> Self {
        Self {
            local,
            remote,
            today: utc_today,
        }
    }

    /// Replaces the wall clock used to derive the date of a write.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> DateKey {
        DateKey::new((self.today)())
    }

    pub async fn get_today(&self, user: &UserKey) -> Option<DailyEntry> {
        self.get_entry(user, &self.today()).await
    }

    /// `None` means nothing has been written for this user yet.
    pub async fn get_entry(&self, user: &UserKey, date: &DateKey) -> Option<DailyEntry> {
        let fetched = self
            .remote
            .fetch(
                &reflection_key(user),
                TABLE,
                |remote| async move { remote.fetch_daily_entry(user, date).await },
                |entry| self.cache_locally(user, entry),
            )
            .await;
        if fetched.is_some() {
            return fetched;
        }

        let reflection = store::read_raw(self.local.as_ref(), &reflection_key(user));
        let analysis: Option<AnalysisResponse> =
            store::read_json(self.local.as_ref(), &analysis_key(user));
        if reflection.is_none() && analysis.is_none() {
            return None;
        }
        Some(DailyEntry {
            reflection: reflection.unwrap_or_default(),
            analysis,
        })
    }

    /// Writes today's entry, overwriting any earlier one for the same day.
    pub async fn save_entry(&self, user: &UserKey, entry: DailyEntry) -> DailyEntry {
        let date = self.today();
        let owner = user.clone();
        let snapshot = entry.clone();
        self.remote.write(
            reflection_key(user),
            TABLE,
            || self.cache_locally(user, &entry),
            move |remote| async move {
                remote
                    .upsert_daily_entry(&owner, &date, &snapshot, Utc::now())
                    .await
            },
        );

        info!(
            user = %user,
            date = %date,
            has_analysis = entry.analysis.is_some(),
            "Daily entry saved"
        );
        entry
    }

    fn cache_locally(&self, user: &UserKey, entry: &DailyEntry) {
        let local = self.local.as_ref();
        store::write_raw(local, &reflection_key(user), &entry.reflection);
        match &entry.analysis {
            Some(analysis) => {
                store::write_json(local, &analysis_key(user), analysis);
            }
            None => {
                store::remove(local, &analysis_key(user));
            }
        }
    }
}
