use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{error, info, instrument};

use crate::{
    auth::extractors::AdminUser,
    cv::{
        dto::{
            CertificateInput, CvResponse, EducationInput, LanguageInput, PersonalInfoInput,
            SkillInput, StrengthInput, WorkExperienceInput,
        },
        entities::{Certificate, Education, Language, PersonalInfo, Skill, Strength, WorkExperience},
        repo,
    },
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/cv", get(get_full_cv))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/personal-info", put(update_personal_info))
        .route("/admin/work-experience", post(create_work_experience))
        .route(
            "/admin/work-experience/:id",
            put(update_work_experience).delete(delete_work_experience),
        )
        .route("/admin/education", post(create_education))
        .route(
            "/admin/education/:id",
            put(update_education).delete(delete_education),
        )
        .route("/admin/skills", post(create_skill))
        .route("/admin/skills/:id", put(update_skill).delete(delete_skill))
        .route("/admin/certificates", post(create_certificate))
        .route(
            "/admin/certificates/:id",
            put(update_certificate).delete(delete_certificate),
        )
        .route("/admin/languages", post(create_language))
        .route(
            "/admin/languages/:id",
            put(update_language).delete(delete_language),
        )
        .route("/admin/strengths", post(create_strength))
        .route(
            "/admin/strengths/:id",
            put(update_strength).delete(delete_strength),
        )
}

// --- public read ---

#[instrument(skip(state))]
pub async fn get_full_cv(
    State(state): State<AppState>,
) -> Result<Json<CvResponse>, (StatusCode, String)> {
    let db = &state.db;
    Ok(Json(CvResponse {
        personal_info: repo::find_personal_info(db).await.map_err(internal)?,
        work_experience: repo::list_work_experience(db).await.map_err(internal)?,
        education: repo::list_education(db).await.map_err(internal)?,
        skills: repo::list_skills(db).await.map_err(internal)?,
        certificates: repo::list_certificates(db).await.map_err(internal)?,
        languages: repo::list_languages(db).await.map_err(internal)?,
        strengths: repo::list_strengths(db).await.map_err(internal)?,
    }))
}

// --- personal info ---

#[instrument(skip(state, admin, input))]
pub async fn update_personal_info(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(input): Json<PersonalInfoInput>,
) -> Result<Json<PersonalInfo>, (StatusCode, String)> {
    let updated = repo::update_personal_info(&state.db, &input)
        .await
        .map_err(internal)?;
    match updated {
        Some(info) => {
            info!(email = %admin.email, "personal info updated");
            Ok(Json(info))
        }
        // The row is provisioned out of band; never auto-seeded here.
        None => Err((StatusCode::NOT_FOUND, "Personal info not found".into())),
    }
}

// --- work experience ---

#[instrument(skip(state, admin, input))]
pub async fn create_work_experience(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(input): Json<WorkExperienceInput>,
) -> Result<Json<WorkExperience>, (StatusCode, String)> {
    let row = repo::insert_work_experience(&state.db, &input)
        .await
        .map_err(internal)?;
    info!(email = %admin.email, id = row.id, "work experience created");
    Ok(Json(row))
}

#[instrument(skip(state, admin, input))]
pub async fn update_work_experience(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
    Json(input): Json<WorkExperienceInput>,
) -> Result<Json<WorkExperience>, (StatusCode, String)> {
    let row = repo::update_work_experience(&state.db, id, &input)
        .await
        .map_err(internal)?
        .ok_or(not_found())?;
    info!(email = %admin.email, id, "work experience updated");
    Ok(Json(row))
}

#[instrument(skip(state, admin))]
pub async fn delete_work_experience(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    repo::delete_work_experience(&state.db, id)
        .await
        .map_err(internal)?;
    info!(email = %admin.email, id, "work experience deleted");
    Ok(StatusCode::NO_CONTENT)
}

// --- education ---

#[instrument(skip(state, admin, input))]
pub async fn create_education(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(input): Json<EducationInput>,
) -> Result<Json<Education>, (StatusCode, String)> {
    let row = repo::insert_education(&state.db, &input)
        .await
        .map_err(internal)?;
    info!(email = %admin.email, id = row.id, "education created");
    Ok(Json(row))
}

#[instrument(skip(state, admin, input))]
pub async fn update_education(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
    Json(input): Json<EducationInput>,
) -> Result<Json<Education>, (StatusCode, String)> {
    let row = repo::update_education(&state.db, id, &input)
        .await
        .map_err(internal)?
        .ok_or(not_found())?;
    info!(email = %admin.email, id, "education updated");
    Ok(Json(row))
}

#[instrument(skip(state, admin))]
pub async fn delete_education(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    repo::delete_education(&state.db, id)
        .await
        .map_err(internal)?;
    info!(email = %admin.email, id, "education deleted");
    Ok(StatusCode::NO_CONTENT)
}

// --- skills ---

#[instrument(skip(state, admin, input))]
pub async fn create_skill(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(input): Json<SkillInput>,
) -> Result<Json<Skill>, (StatusCode, String)> {
    let row = repo::insert_skill(&state.db, &input)
        .await
        .map_err(internal)?;
    info!(email = %admin.email, id = row.id, "skill created");
    Ok(Json(row))
}

#[instrument(skip(state, admin, input))]
pub async fn update_skill(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
    Json(input): Json<SkillInput>,
) -> Result<Json<Skill>, (StatusCode, String)> {
    let row = repo::update_skill(&state.db, id, &input)
        .await
        .map_err(internal)?
        .ok_or(not_found())?;
    info!(email = %admin.email, id, "skill updated");
    Ok(Json(row))
}

#[instrument(skip(state, admin))]
pub async fn delete_skill(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    repo::delete_skill(&state.db, id).await.map_err(internal)?;
    info!(email = %admin.email, id, "skill deleted");
    Ok(StatusCode::NO_CONTENT)
}

// --- certificates ---

#[instrument(skip(state, admin, input))]
pub async fn create_certificate(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(input): Json<CertificateInput>,
) -> Result<Json<Certificate>, (StatusCode, String)> {
    let row = repo::insert_certificate(&state.db, &input)
        .await
        .map_err(internal)?;
    info!(email = %admin.email, id = row.id, "certificate created");
    Ok(Json(row))
}

#[instrument(skip(state, admin, input))]
pub async fn update_certificate(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
    Json(input): Json<CertificateInput>,
) -> Result<Json<Certificate>, (StatusCode, String)> {
    let row = repo::update_certificate(&state.db, id, &input)
        .await
        .map_err(internal)?
        .ok_or(not_found())?;
    info!(email = %admin.email, id, "certificate updated");
    Ok(Json(row))
}

#[instrument(skip(state, admin))]
pub async fn delete_certificate(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    repo::delete_certificate(&state.db, id)
        .await
        .map_err(internal)?;
    info!(email = %admin.email, id, "certificate deleted");
    Ok(StatusCode::NO_CONTENT)
}

// --- languages ---

#[instrument(skip(state, admin, input))]
pub async fn create_language(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(input): Json<LanguageInput>,
) -> Result<Json<Language>, (StatusCode, String)> {
    let row = repo::insert_language(&state.db, &input)
        .await
        .map_err(internal)?;
    info!(email = %admin.email, id = row.id, "language created");
    Ok(Json(row))
}

#[instrument(skip(state, admin, input))]
pub async fn update_language(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
    Json(input): Json<LanguageInput>,
) -> Result<Json<Language>, (StatusCode, String)> {
    let row = repo::update_language(&state.db, id, &input)
        .await
        .map_err(internal)?
        .ok_or(not_found())?;
    info!(email = %admin.email, id, "language updated");
    Ok(Json(row))
}

#[instrument(skip(state, admin))]
pub async fn delete_language(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    repo::delete_language(&state.db, id)
        .await
        .map_err(internal)?;
    info!(email = %admin.email, id, "language deleted");
    Ok(StatusCode::NO_CONTENT)
}

// --- strengths ---

#[instrument(skip(state, admin, input))]
pub async fn create_strength(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(input): Json<StrengthInput>,
) -> Result<Json<Strength>, (StatusCode, String)> {
    let row = repo::insert_strength(&state.db, &input)
        .await
        .map_err(internal)?;
    info!(email = %admin.email, id = row.id, "strength created");
    Ok(Json(row))
}

#[instrument(skip(state, admin, input))]
pub async fn update_strength(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
    Json(input): Json<StrengthInput>,
) -> Result<Json<Strength>, (StatusCode, String)> {
    let row = repo::update_strength(&state.db, id, &input)
        .await
        .map_err(internal)?
        .ok_or(not_found())?;
    info!(email = %admin.email, id, "strength updated");
    Ok(Json(row))
}

#[instrument(skip(state, admin))]
pub async fn delete_strength(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    repo::delete_strength(&state.db, id)
        .await
        .map_err(internal)?;
    info!(email = %admin.email, id, "strength deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "cv store error");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into())
}

fn not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Not found".into())
}
