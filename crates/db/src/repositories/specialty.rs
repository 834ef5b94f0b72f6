use crate::models::DbSpecialty;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn list_specialties(pool: &Pool<Postgres>) -> Result<Vec<DbSpecialty>> {
    let specialties = sqlx::query_as::<_, DbSpecialty>(
        r#"
        SELECT id, name, description, icon, created_at
        FROM specialties
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(specialties)
}

pub async fn create_specialty(
    pool: &Pool<Postgres>,
    name: &str,
    description: Option<&str>,
    icon: &str,
) -> Result<DbSpecialty> {
    tracing::debug!("Creating specialty: name={}", name);

    let specialty = sqlx::query_as::<_, DbSpecialty>(
        r#"
        INSERT INTO specialties (name, description, icon)
        VALUES ($1, $2, $3)
        RETURNING id, name, description, icon, created_at
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(icon)
    .fetch_one(pool)
    .await?;

    Ok(specialty)
}
