use crate::models::DbDoctor;
use clinic_core::models::doctor::{Doctor, NewDoctor};
use eyre::Result;
use sqlx::{Pool, Postgres};

/// Columns of a doctor row `d` joined with its specialty `s`.
const DOCTOR_PROJECTION: &str = r#"
    d.id, d.name, d.specialty_id, d.email, d.phone, d.photo_url,
    d.experience_years, d.consultation_duration, d.working_hours_start,
    d.working_hours_end, d.available_days, d.fee, d.bio, d.is_active,
    d.created_at, s.name AS specialty_name, s.icon AS specialty_icon
"#;

pub async fn list_doctors(
    pool: &Pool<Postgres>,
    specialty_id: Option<i64>,
    include_inactive: bool,
) -> Result<Vec<DbDoctor>> {
    let query = format!(
        r#"
        SELECT {DOCTOR_PROJECTION}
        FROM doctors d
        LEFT JOIN specialties s ON d.specialty_id = s.id
        WHERE ($1::BIGINT IS NULL OR d.specialty_id = $1)
          AND ($2 OR d.is_active)
        ORDER BY d.name ASC
        "#
    );

    let doctors = sqlx::query_as::<_, DbDoctor>(&query)
        .bind(specialty_id)
        .bind(include_inactive)
        .fetch_all(pool)
        .await?;

    Ok(doctors)
}

pub async fn get_doctor_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbDoctor>> {
    let query = format!(
        r#"
        SELECT {DOCTOR_PROJECTION}
        FROM doctors d
        LEFT JOIN specialties s ON d.specialty_id = s.id
        WHERE d.id = $1
        "#
    );

    let doctor = sqlx::query_as::<_, DbDoctor>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(doctor)
}

pub async fn create_doctor(pool: &Pool<Postgres>, doctor: &NewDoctor) -> Result<DbDoctor> {
    tracing::debug!("Creating doctor: name={}, email={}", doctor.name, doctor.email);

    let query = format!(
        r#"
        WITH d AS (
            INSERT INTO doctors (
                name, specialty_id, email, phone, photo_url, experience_years,
                consultation_duration, working_hours_start, working_hours_end,
                available_days, fee, bio
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
        )
        SELECT {DOCTOR_PROJECTION}
        FROM d
        LEFT JOIN specialties s ON d.specialty_id = s.id
        "#
    );

    let created = sqlx::query_as::<_, DbDoctor>(&query)
        .bind(&doctor.name)
        .bind(doctor.specialty_id)
        .bind(&doctor.email)
        .bind(&doctor.phone)
        .bind(&doctor.photo_url)
        .bind(doctor.experience_years)
        .bind(doctor.consultation_duration)
        .bind(&doctor.working_hours_start)
        .bind(&doctor.working_hours_end)
        .bind(&doctor.available_days)
        .bind(doctor.fee)
        .bind(&doctor.bio)
        .fetch_one(pool)
        .await?;

    Ok(created)
}

/// Writes every editable column of `doctor`. Returns `None` when no row has its id.
pub async fn update_doctor(pool: &Pool<Postgres>, doctor: &Doctor) -> Result<Option<DbDoctor>> {
    let query = format!(
        r#"
        WITH d AS (
            UPDATE doctors
            SET name = $2, specialty_id = $3, email = $4, phone = $5, photo_url = $6,
                experience_years = $7, consultation_duration = $8,
                working_hours_start = $9, working_hours_end = $10,
                available_days = $11, fee = $12, bio = $13, is_active = $14
            WHERE id = $1
            RETURNING *
        )
        SELECT {DOCTOR_PROJECTION}
        FROM d
        LEFT JOIN specialties s ON d.specialty_id = s.id
        "#
    );

    let updated = sqlx::query_as::<_, DbDoctor>(&query)
        .bind(doctor.id)
        .bind(&doctor.name)
        .bind(doctor.specialty_id)
        .bind(&doctor.email)
        .bind(&doctor.phone)
        .bind(&doctor.photo_url)
        .bind(doctor.experience_years)
        .bind(doctor.consultation_duration)
        .bind(&doctor.working_hours_start)
        .bind(&doctor.working_hours_end)
        .bind(&doctor.available_days)
        .bind(doctor.fee)
        .bind(&doctor.bio)
        .bind(doctor.is_active)
        .fetch_optional(pool)
        .await?;

    Ok(updated)
}
