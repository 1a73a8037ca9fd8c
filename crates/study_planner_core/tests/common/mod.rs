#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use study_planner_core::domain::{
    DaySummary, EffortType, MessageCategory, PlanItem, PlanItemType, PsychologicalSupport,
    QuranicLink, StressLevel, WebAnalysis,
};
use study_planner_core::{
    AnalysisRequest, AnalysisResponse, DailyEntry, DateKey, DayAnalysisService, LocalStore,
    MemoryStore, MotivationalMessage, PortError, PortResult, RemoteStore, RemoteSync, StudyPlan,
    UserKey, WeeklySchedule,
};

//=========================================================================================
// Remote Store Fake
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RemoteMode {
    Healthy,
    /// Every call fails as if the network were down.
    Failing,
    /// Reads sleep this long before answering.
    SlowReads(Duration),
}

pub struct FakeRemote {
    mode: Mutex<RemoteMode>,
    write_delay: Mutex<Duration>,
    plan: Mutex<Option<StudyPlan>>,
    schedules: Mutex<HashMap<String, WeeklySchedule>>,
    entries: Mutex<HashMap<(String, String), DailyEntry>>,
    pub upserts: AtomicUsize,
}

impl FakeRemote {
    pub fn new(mode: RemoteMode) -> Arc<Self> {
        Arc::new(Self {
            mode: Mutex::new(mode),
            write_delay: Mutex::new(Duration::ZERO),
            plan: Mutex::new(None),
            schedules: Mutex::new(HashMap::new()),
            entries: Mutex::new(HashMap::new()),
            upserts: AtomicUsize::new(0),
        })
    }

    pub fn set_mode(&self, mode: RemoteMode) {
        *self.mode.lock().unwrap() = mode;
    }

    pub fn set_write_delay(&self, delay: Duration) {
        *self.write_delay.lock().unwrap() = delay;
    }

    pub fn seed_plan(&self, plan: StudyPlan) {
        *self.plan.lock().unwrap() = Some(plan);
    }

    pub fn stored_plan(&self) -> Option<StudyPlan> {
        self.plan.lock().unwrap().clone()
    }

    pub fn stored_schedule(&self, remote_id: &str) -> Option<WeeklySchedule> {
        self.schedules.lock().unwrap().get(remote_id).cloned()
    }

    pub fn stored_entry(&self, remote_id: &str, date: &str) -> Option<DailyEntry> {
        self.entries
            .lock()
            .unwrap()
            .get(&(remote_id.to_string(), date.to_string()))
            .cloned()
    }

    pub fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    async fn before_read(&self) -> PortResult<()> {
        let mode = *self.mode.lock().unwrap();
        match mode {
            RemoteMode::Healthy => Ok(()),
            RemoteMode::Failing => Err(PortError::Unexpected("connection refused".to_string())),
            RemoteMode::SlowReads(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
        }
    }

    async fn before_write(&self) -> PortResult<()> {
        let delay = *self.write_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if *self.mode.lock().unwrap() == RemoteMode::Failing {
            return Err(PortError::Unexpected("connection refused".to_string()));
        }
        self.upserts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for FakeRemote {
    async fn fetch_plan(&self) -> PortResult<StudyPlan> {
        self.before_read().await?;
        self.stored_plan()
            .ok_or_else(|| PortError::NotFound("study_plans row 1".to_string()))
    }

    async fn upsert_plan(&self, plan: &StudyPlan, _updated_at: DateTime<Utc>) -> PortResult<()> {
        self.before_write().await?;
        self.seed_plan(plan.clone());
        Ok(())
    }

    async fn fetch_schedule(&self, user: &UserKey) -> PortResult<WeeklySchedule> {
        self.before_read().await?;
        self.stored_schedule(&user.remote_id())
            .ok_or_else(|| PortError::NotFound(user.remote_id()))
    }

    async fn upsert_schedule(
        &self,
        user: &UserKey,
        schedule: &WeeklySchedule,
        _updated_at: DateTime<Utc>,
    ) -> PortResult<()> {
        self.before_write().await?;
        self.schedules
            .lock()
            .unwrap()
            .insert(user.remote_id(), schedule.clone());
        Ok(())
    }

    async fn fetch_daily_entry(&self, user: &UserKey, date: &DateKey) -> PortResult<DailyEntry> {
        self.before_read().await?;
        self.stored_entry(&user.remote_id(), &date.to_string())
            .ok_or_else(|| PortError::NotFound(format!("{} {}", user.remote_id(), date)))
    }

    async fn upsert_daily_entry(
        &self,
        user: &UserKey,
        date: &DateKey,
        entry: &DailyEntry,
        _updated_at: DateTime<Utc>,
    ) -> PortResult<()> {
        self.before_write().await?;
        self.entries
            .lock()
            .unwrap()
            .insert((user.remote_id(), date.to_string()), entry.clone());
        Ok(())
    }
}

pub fn sync_with(remote: &Arc<FakeRemote>) -> RemoteSync {
    let handle: Arc<dyn RemoteStore> = remote.clone();
    RemoteSync::new(Some(handle), Duration::from_millis(200))
}

pub fn memory() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

//=========================================================================================
// Local Store Fake
//=========================================================================================

/// A local store whose writes always fail, as with a full or disabled disk.
pub struct ReadOnlyStore;

impl LocalStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> PortResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> PortResult<()> {
        Err(PortError::Unexpected("quota exceeded".to_string()))
    }

    fn remove(&self, _key: &str) -> PortResult<()> {
        Err(PortError::Unexpected("storage disabled".to_string()))
    }
}

//=========================================================================================
// Analysis Service Fake
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnalysisOutcome {
    Succeed,
    Quota,
    Broken,
}

pub struct FakeAnalysis {
    outcome: AnalysisOutcome,
    pub last_request: Mutex<Option<AnalysisRequest>>,
}

impl FakeAnalysis {
    pub fn new(outcome: AnalysisOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            last_request: Mutex::new(None),
        })
    }
}

#[async_trait]
impl DayAnalysisService for FakeAnalysis {
    async fn analyze_day(&self, request: &AnalysisRequest) -> PortResult<AnalysisResponse> {
        *self.last_request.lock().unwrap() = Some(request.clone());
        match self.outcome {
            AnalysisOutcome::Succeed => Ok(sample_analysis(64.0)),
            AnalysisOutcome::Quota => Err(PortError::QuotaExceeded("429".to_string())),
            AnalysisOutcome::Broken => Err(PortError::Unexpected("malformed json".to_string())),
        }
    }

    async fn fresh_inspiration(&self) -> PortResult<MotivationalMessage> {
        match self.outcome {
            AnalysisOutcome::Succeed => Ok(MotivationalMessage {
                text: "العلم نور".to_string(),
                source: "حكمة".to_string(),
                category: Some(MessageCategory::Wisdom),
            }),
            _ => Err(PortError::Unexpected("offline".to_string())),
        }
    }
}

pub fn sample_analysis(balance_score: f64) -> AnalysisResponse {
    AnalysisResponse {
        summary: DaySummary {
            accomplishment: "ذاكرت الفيزياء".to_string(),
            effort_type: EffortType::Mental,
            stress_level: StressLevel::Medium,
            analysis_text: "يوم متوازن".to_string(),
        },
        web_analysis: WebAnalysis {
            root_cause: "قلة النوم".to_string(),
            suggested_remedy: "نم مبكراً".to_string(),
            sources: vec![],
        },
        motivational_message: MotivationalMessage {
            text: "استمر".to_string(),
            source: "مجهول".to_string(),
            category: None,
        },
        tomorrow_plan: vec![PlanItem {
            time: "08:00".to_string(),
            task: "كيمياء".to_string(),
            method: None,
            kind: PlanItemType::Study,
        }],
        recommended_methods: vec![],
        research_connections: vec![],
        psychological_support: PsychologicalSupport {
            message: "أنت تقدر".to_string(),
            technique: "تنفس عميق".to_string(),
        },
        quranic_link: QuranicLink {
            verse: "وقل رب زدني علماً".to_string(),
            surah: "طه".to_string(),
            behavioral_explanation: "طلب العلم عبادة".to_string(),
        },
        balance_score,
    }
}

pub fn fixed_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date")
}

pub fn user(name: &str) -> UserKey {
    UserKey::from_name(name).expect("non-blank name")
}
