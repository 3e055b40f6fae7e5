use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;
use crate::core::Leaderboard;
use crate::models::{
    Course, CoursesResponse, DeleteResponse, HealthResponse, PreviewQuery, RankingQuery, RankingResponse,
    RankingKey, SortDirection, UploadQuery, UploadResponse, WeightConfig,
};
use crate::routes::ApiError;
use crate::services::{
    parse_scores, CachedRanking, GradebookStore, RankingCache, RankingCacheKey, StoreError,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<GradebookStore>,
    pub cache: Arc<RankingCache>,
}

/// Configure all course-related routes
///
/// Handlers that need the default weights read them from `web::Data<WeightConfig>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/courses", web::get().to(list_courses))
        .route("/courses/upload", web::post().to(upload_course))
        .route("/courses/{id}/ranking", web::get().to(course_ranking))
        .route("/courses/{id}", web::delete().to(delete_course))
        .route("/rankings/preview", web::post().to(preview_ranking));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cached_rankings: state.cache.stats().entries,
        timestamp: chrono::Utc::now(),
    })
}

/// List courses
///
/// GET /api/v1/courses
async fn list_courses(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let courses = state.store.list_courses().await?;
    Ok(HttpResponse::Ok().json(CoursesResponse { courses }))
}

/// Upload a course spreadsheet
///
/// POST /api/v1/courses/upload?courseName=..&maxWorkWeight=..&targetExamWeight=..&baseExamWeight=..
///
/// Body: CSV with columns `nome,Trab,AV,AVS` (or `name,work,exam,makeup`).
/// The course is created or updated by name and its roster replaced.
async fn upload_course(
    state: web::Data<AppState>,
    defaults: web::Data<WeightConfig>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    query.validate().map_err(|e| ApiError::Validation(e.to_string()))?;

    let course_name = query.course_name.trim();
    if course_name.is_empty() {
        return Err(ApiError::Validation("courseName cannot be blank".to_string()));
    }

    // Weights are checked before the spreadsheet is even read
    let weights = query.weights(&defaults);
    let board = Leaderboard::new(weights)?;

    let rows = parse_scores(&body)?;
    let scored = board.score(&rows)?;

    let course = state.store.save_course(course_name, &weights, &scored).await?;
    state.cache.invalidate_course(course.id, course.revision - 1).await;

    tracing::info!(
        "Uploaded {} students for course '{}' (revision {})",
        scored.len(),
        course.name,
        course.revision
    );

    Ok(HttpResponse::Ok().json(UploadResponse {
        course_id: course.id,
        course_name: course.name,
        revision: course.revision,
        student_count: scored.len(),
    }))
}

/// Grade and rank a spreadsheet without storing it
///
/// POST /api/v1/rankings/preview?key=finalScore&direction=desc&...weights
pub async fn preview_ranking(
    defaults: web::Data<WeightConfig>,
    query: web::Query<PreviewQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let weights = query.weights(&defaults);
    let board = Leaderboard::new(weights)?;

    let rows = parse_scores(&body)?;
    let ranking = board.build(&rows, query.key, query.direction)?;

    Ok(HttpResponse::Ok().json(RankingResponse {
        course_id: None,
        course_name: None,
        weights,
        key: query.key,
        direction: query.direction,
        total_results: ranking.len(),
        ranking,
    }))
}

/// Ranked leaderboard for a course
///
/// GET /api/v1/courses/{id}/ranking?key=finalScore&direction=desc
async fn course_ranking(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<RankingQuery>,
) -> Result<HttpResponse, ApiError> {
    let course_id = path.into_inner();
    let RankingQuery { key, direction } = query.into_inner();

    let (course, ranking) = cached_ranking(&state, course_id, key, direction).await?;

    Ok(HttpResponse::Ok().json(RankingResponse {
        course_id: Some(course.id),
        course_name: Some(course.name),
        weights: course.weights,
        key,
        direction,
        total_results: ranking.len(),
        ranking: Vec::clone(&ranking),
    }))
}

/// Look up the leaderboard for the course's current revision, computing it on a miss
///
/// On a miss the weights and roster come from one snapshot and the result is
/// cached under the snapshot's revision, which may be newer than the one
/// looked up.
async fn cached_ranking(
    state: &AppState,
    course_id: i64,
    key: RankingKey,
    direction: SortDirection,
) -> Result<(Course, CachedRanking), ApiError> {
    let course = state.store.get_course(course_id).await?;
    let cache_key = RankingCacheKey::ranking(course.id, course.revision, key, direction);
    if let Some(hit) = state.cache.get(&cache_key).await {
        return Ok((course, hit));
    }

    let (course, scored) = state.store.course_snapshot(course_id).await?;
    let ranking = Arc::new(Leaderboard::new(course.weights)?.rank(scored, key, direction)?);

    let cache_key = RankingCacheKey::ranking(course.id, course.revision, key, direction);
    state.cache.insert(cache_key, Arc::clone(&ranking)).await;
    Ok((course, ranking))
}

/// Delete a course and its students
///
/// DELETE /api/v1/courses/{id}
async fn delete_course(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let course_id = path.into_inner();

    let revision = state
        .store
        .delete_course(course_id)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("course {}", course_id)))?;
    state.cache.invalidate_course(course_id, revision).await;

    tracing::info!("Deleted course {}", course_id);

    Ok(HttpResponse::Ok().json(DeleteResponse {
        success: true,
        course_id,
    }))
}
