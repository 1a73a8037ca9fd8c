//! crates/study_planner_core/src/repository/plan.rs

use crate::domain::{StudyPlan, SubjectId};
use crate::keys::PLAN_KEY;
use crate::ports::LocalStore;
use crate::seed::initial_plan;
use crate::store;
use crate::sync::RemoteSync;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

const TABLE: &str = "study_plans";

/// Owns the single, process-wide study plan document.
#[derive(Clone)]
pub struct PlanRepository {
    local: Arc<dyn LocalStore>,
    remote: RemoteSync,
}

impl PlanRepository {
    pub fn new(local: Arc<dyn LocalStore>, remote: RemoteSync) -> Self {
        Self { local, remote }
    }

    /// Remote row, then local copy, then the seed plan.
    pub async fn get_plan(&self) -> StudyPlan {
        let fetched = self
            .remote
            .fetch(
                PLAN_KEY,
                TABLE,
                |remote| async move { remote.fetch_plan().await },
                |plan| {
                    store::write_json(self.local.as_ref(), PLAN_KEY, plan);
                },
            )
            .await;
        if let Some(plan) = fetched {
            return plan;
        }

        store::read_json(self.local.as_ref(), PLAN_KEY).unwrap_or_else(|| {
            debug!("No stored plan; using the seed plan");
            initial_plan()
        })
    }

    /// Sets one task's status on a copy of `current`, persists it and returns it.
    ///
    /// An unknown task leaves the plan unchanged; the write still happens.
    pub async fn update_task_status(
        &self,
        current: &StudyPlan,
        subject: SubjectId,
        task_id: &str,
        is_completed: bool,
    ) -> StudyPlan {
        if current.task_status(subject, task_id).is_none() {
            debug!(%subject, task_id, "Task not found in plan; nothing to update");
        }
        let next = current.with_task_status(subject, task_id, is_completed);

        let snapshot = next.clone();
        self.remote.write(
            PLAN_KEY.to_string(),
            TABLE,
            || {
                store::write_json(self.local.as_ref(), PLAN_KEY, &next);
            },
            move |remote| async move { remote.upsert_plan(&snapshot, Utc::now()).await },
        );

        info!(%subject, task_id, is_completed, "Task status updated");
        next
    }

    /// Flips a task using its current status; a missing task counts as not completed.
    pub async fn toggle_task(&self, subject: SubjectId, task_id: &str) -> StudyPlan {
        let current = self.get_plan().await;
        let status = current.task_status(subject, task_id).unwrap_or(false);
        self.update_task_status(&current, subject, task_id, !status)
            .await
    }
}
