pub mod analysis;
pub mod domain;
pub mod keys;
pub mod ports;
pub mod repository;
pub mod seed;
pub mod store;
pub mod sync;

pub use analysis::{AnalysisError, DailyAnalysis};
pub use domain::{
    AnalysisRequest, AnalysisResponse, DailyEntry, DateKey, GradeLevel, MotivationalMessage,
    StudyPlan, SubjectData, SubjectId, SubjectTasks, Task, UserKey, UserProfile, WeeklySchedule,
};
pub use ports::{DayAnalysisService, LocalStore, PortError, PortResult, RemoteStore};
pub use repository::{DailyEntryRepository, PlanRepository, ProfileStore, ScheduleRepository};
pub use seed::initial_plan;
pub use store::MemoryStore;
pub use sync::RemoteSync;
