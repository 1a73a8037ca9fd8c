pub mod analysis_llm;
pub mod db;
pub mod local_file;

pub use analysis_llm::OpenAiAnalysisAdapter;
pub use db::PgRemoteStore;
pub use local_file::FileStore;
