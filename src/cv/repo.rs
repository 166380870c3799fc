use sqlx::PgPool;

use crate::cv::dto::{
    CertificateInput, EducationInput, LanguageInput, PersonalInfoInput, SkillInput, StrengthInput,
    WorkExperienceInput,
};
use crate::cv::entities::{
    Certificate, Education, Language, PersonalInfo, Skill, Strength, WorkExperience,
};

// --- personal info (singleton) ---

pub async fn find_personal_info(db: &PgPool) -> anyhow::Result<Option<PersonalInfo>> {
    let row = sqlx::query_as::<_, PersonalInfo>(
        r#"
        SELECT id, name, email, phone, location, linkedin_url, photo_url, objective, updated_at
        FROM personal_info
        ORDER BY id ASC
        LIMIT 1
        "#,
    )
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Full replace of the singleton's mutable fields; `None` when the row was
/// never seeded. The subquery pins the update to the first row so a stray
/// duplicate can never be touched.
pub async fn update_personal_info(
    db: &PgPool,
    input: &PersonalInfoInput,
) -> anyhow::Result<Option<PersonalInfo>> {
    let row = sqlx::query_as::<_, PersonalInfo>(
        r#"
        UPDATE personal_info
        SET name = $1, email = $2, phone = $3, location = $4,
            linkedin_url = $5, photo_url = $6, objective = $7, updated_at = now()
        WHERE id = (SELECT id FROM personal_info ORDER BY id ASC LIMIT 1)
        RETURNING id, name, email, phone, location, linkedin_url, photo_url, objective, updated_at
        "#,
    )
    .bind(&input.name)
    .bind(&input.email)
    .bind(&input.phone)
    .bind(&input.location)
    .bind(&input.linkedin_url)
    .bind(&input.photo_url)
    .bind(&input.objective)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

// --- work experience ---

pub async fn list_work_experience(db: &PgPool) -> anyhow::Result<Vec<WorkExperience>> {
    let rows = sqlx::query_as::<_, WorkExperience>(
        r#"
        SELECT id, title, company, location, start_date, end_date,
               responsibilities, projects, sort_order, created_at
        FROM work_experience
        ORDER BY sort_order ASC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert_work_experience(
    db: &PgPool,
    input: &WorkExperienceInput,
) -> anyhow::Result<WorkExperience> {
    let row = sqlx::query_as::<_, WorkExperience>(
        r#"
        INSERT INTO work_experience
            (title, company, location, start_date, end_date, responsibilities, projects, sort_order)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, title, company, location, start_date, end_date,
                  responsibilities, projects, sort_order, created_at
        "#,
    )
    .bind(&input.title)
    .bind(&input.company)
    .bind(&input.location)
    .bind(&input.start_date)
    .bind(&input.end_date)
    .bind(&input.responsibilities)
    .bind(&input.projects)
    .bind(input.sort_order)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn update_work_experience(
    db: &PgPool,
    id: i64,
    input: &WorkExperienceInput,
) -> anyhow::Result<Option<WorkExperience>> {
    let row = sqlx::query_as::<_, WorkExperience>(
        r#"
        UPDATE work_experience
        SET title = $2, company = $3, location = $4, start_date = $5, end_date = $6,
            responsibilities = $7, projects = $8, sort_order = $9
        WHERE id = $1
        RETURNING id, title, company, location, start_date, end_date,
                  responsibilities, projects, sort_order, created_at
        "#,
    )
    .bind(id)
    .bind(&input.title)
    .bind(&input.company)
    .bind(&input.location)
    .bind(&input.start_date)
    .bind(&input.end_date)
    .bind(&input.responsibilities)
    .bind(&input.projects)
    .bind(input.sort_order)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete_work_experience(db: &PgPool, id: i64) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM work_experience WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

// --- education ---

pub async fn list_education(db: &PgPool) -> anyhow::Result<Vec<Education>> {
    let rows = sqlx::query_as::<_, Education>(
        r#"
        SELECT id, degree, field, school, location, start_date, end_date, sort_order
        FROM education
        ORDER BY sort_order ASC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert_education(db: &PgPool, input: &EducationInput) -> anyhow::Result<Education> {
    let row = sqlx::query_as::<_, Education>(
        r#"
        INSERT INTO education (degree, field, school, location, start_date, end_date, sort_order)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, degree, field, school, location, start_date, end_date, sort_order
        "#,
    )
    .bind(&input.degree)
    .bind(&input.field)
    .bind(&input.school)
    .bind(&input.location)
    .bind(&input.start_date)
    .bind(&input.end_date)
    .bind(input.sort_order)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn update_education(
    db: &PgPool,
    id: i64,
    input: &EducationInput,
) -> anyhow::Result<Option<Education>> {
    let row = sqlx::query_as::<_, Education>(
        r#"
        UPDATE education
        SET degree = $2, field = $3, school = $4, location = $5,
            start_date = $6, end_date = $7, sort_order = $8
        WHERE id = $1
        RETURNING id, degree, field, school, location, start_date, end_date, sort_order
        "#,
    )
    .bind(id)
    .bind(&input.degree)
    .bind(&input.field)
    .bind(&input.school)
    .bind(&input.location)
    .bind(&input.start_date)
    .bind(&input.end_date)
    .bind(input.sort_order)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete_education(db: &PgPool, id: i64) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM education WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

// --- skills ---

pub async fn list_skills(db: &PgPool) -> anyhow::Result<Vec<Skill>> {
    let rows = sqlx::query_as::<_, Skill>(
        r#"
        SELECT id, name, category, sort_order
        FROM skills
        ORDER BY sort_order ASC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert_skill(db: &PgPool, input: &SkillInput) -> anyhow::Result<Skill> {
    let row = sqlx::query_as::<_, Skill>(
        r#"
        INSERT INTO skills (name, category, sort_order)
        VALUES ($1, $2, $3)
        RETURNING id, name, category, sort_order
        "#,
    )
    .bind(&input.name)
    .bind(&input.category)
    .bind(input.sort_order)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn update_skill(
    db: &PgPool,
    id: i64,
    input: &SkillInput,
) -> anyhow::Result<Option<Skill>> {
    let row = sqlx::query_as::<_, Skill>(
        r#"
        UPDATE skills
        SET name = $2, category = $3, sort_order = $4
        WHERE id = $1
        RETURNING id, name, category, sort_order
        "#,
    )
    .bind(id)
    .bind(&input.name)
    .bind(&input.category)
    .bind(input.sort_order)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete_skill(db: &PgPool, id: i64) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM skills WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

// --- certificates ---

pub async fn list_certificates(db: &PgPool) -> anyhow::Result<Vec<Certificate>> {
    let rows = sqlx::query_as::<_, Certificate>(
        r#"
        SELECT id, name, issuer, date, sort_order
        FROM certificates
        ORDER BY sort_order ASC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert_certificate(
    db: &PgPool,
    input: &CertificateInput,
) -> anyhow::Result<Certificate> {
    let row = sqlx::query_as::<_, Certificate>(
        r#"
        INSERT INTO certificates (name, issuer, date, sort_order)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, issuer, date, sort_order
        "#,
    )
    .bind(&input.name)
    .bind(&input.issuer)
    .bind(&input.date)
    .bind(input.sort_order)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn update_certificate(
    db: &PgPool,
    id: i64,
    input: &CertificateInput,
) -> anyhow::Result<Option<Certificate>> {
    let row = sqlx::query_as::<_, Certificate>(
        r#"
        UPDATE certificates
        SET name = $2, issuer = $3, date = $4, sort_order = $5
        WHERE id = $1
        RETURNING id, name, issuer, date, sort_order
        "#,
    )
    .bind(id)
    .bind(&input.name)
    .bind(&input.issuer)
    .bind(&input.date)
    .bind(input.sort_order)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete_certificate(db: &PgPool, id: i64) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM certificates WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

// --- languages ---

pub async fn list_languages(db: &PgPool) -> anyhow::Result<Vec<Language>> {
    let rows = sqlx::query_as::<_, Language>(
        r#"
        SELECT id, name, proficiency, sort_order
        FROM languages
        ORDER BY sort_order ASC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert_language(db: &PgPool, input: &LanguageInput) -> anyhow::Result<Language> {
    let row = sqlx::query_as::<_, Language>(
        r#"
        INSERT INTO languages (name, proficiency, sort_order)
        VALUES ($1, $2, $3)
        RETURNING id, name, proficiency, sort_order
        "#,
    )
    .bind(&input.name)
    .bind(&input.proficiency)
    .bind(input.sort_order)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn update_language(
    db: &PgPool,
    id: i64,
    input: &LanguageInput,
) -> anyhow::Result<Option<Language>> {
    let row = sqlx::query_as::<_, Language>(
        r#"
        UPDATE languages
        SET name = $2, proficiency = $3, sort_order = $4
        WHERE id = $1
        RETURNING id, name, proficiency, sort_order
        "#,
    )
    .bind(id)
    .bind(&input.name)
    .bind(&input.proficiency)
    .bind(input.sort_order)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete_language(db: &PgPool, id: i64) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM languages WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

// --- strengths ---

pub async fn list_strengths(db: &PgPool) -> anyhow::Result<Vec<Strength>> {
    let rows = sqlx::query_as::<_, Strength>(
        r#"
        SELECT id, name, sort_order
        FROM strengths
        ORDER BY sort_order ASC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert_strength(db: &PgPool, input: &StrengthInput) -> anyhow::Result<Strength> {
    let row = sqlx::query_as::<_, Strength>(
        r#"
        INSERT INTO strengths (name, sort_order)
        VALUES ($1, $2)
        RETURNING id, name, sort_order
        "#,
    )
    .bind(&input.name)
    .bind(input.sort_order)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn update_strength(
    db: &PgPool,
    id: i64,
    input: &StrengthInput,
) -> anyhow::Result<Option<Strength>> {
    let row = sqlx::query_as::<_, Strength>(
        r#"
        UPDATE strengths
        SET name = $2, sort_order = $3
        WHERE id = $1
        RETURNING id, name, sort_order
        "#,
    )
    .bind(id)
    .bind(&input.name)
    .bind(input.sort_order)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete_strength(db: &PgPool, id: i64) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM strengths WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}
