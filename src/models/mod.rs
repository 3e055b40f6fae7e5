// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{ScoreInputRecord, WeightConfig, ScoredRecord, RankedRecord, SortDirection, RankingKey, Course, CourseSummary};
pub use requests::{UploadQuery, PreviewQuery, RankingQuery};
pub use responses::{RankingResponse, UploadResponse, CoursesResponse, HealthResponse, ErrorResponse, DeleteResponse};
