use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

/// Name of the partial unique index that keeps two active appointments off
/// the same doctor, date and time.
pub const ACTIVE_SLOT_INDEX: &str = "uq_appointments_active_slot";
pub const SPECIALTY_NAME_CONSTRAINT: &str = "uq_specialties_name";
pub const DOCTOR_EMAIL_CONSTRAINT: &str = "uq_doctors_email";
pub const DOCTOR_SPECIALTY_CONSTRAINT: &str = "fk_doctors_specialty";

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create specialties table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS specialties (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            description TEXT NULL,
            icon VARCHAR(64) NOT NULL DEFAULT 'fa-stethoscope',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT uq_specialties_name UNIQUE (name)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create doctors table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS doctors (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            specialty_id BIGINT NULL,
            email VARCHAR(255) NOT NULL,
            phone VARCHAR(64) NULL,
            photo_url VARCHAR(512) NOT NULL DEFAULT '/assets/images/doctor-default.jpg',
            experience_years INTEGER NOT NULL DEFAULT 5,
            consultation_duration INTEGER NOT NULL DEFAULT 30,
            working_hours_start VARCHAR(5) NOT NULL DEFAULT '09:00',
            working_hours_end VARCHAR(5) NOT NULL DEFAULT '18:00',
            available_days VARCHAR(32) NOT NULL DEFAULT '1,2,3,4,5',
            fee DOUBLE PRECISION NOT NULL DEFAULT 50.0,
            bio TEXT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT uq_doctors_email UNIQUE (email),
            CONSTRAINT fk_doctors_specialty FOREIGN KEY (specialty_id) REFERENCES specialties(id),
            CONSTRAINT positive_consultation_duration CHECK (consultation_duration > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id BIGSERIAL PRIMARY KEY,
            doctor_id BIGINT NOT NULL REFERENCES doctors(id),
            patient_name VARCHAR(255) NOT NULL,
            patient_email VARCHAR(255) NOT NULL,
            patient_phone VARCHAR(64) NOT NULL,
            appointment_date DATE NOT NULL,
            appointment_time VARCHAR(5) NOT NULL,
            duration INTEGER NOT NULL DEFAULT 30,
            status VARCHAR(16) NOT NULL DEFAULT 'confirmed',
            reason TEXT NULL,
            notes TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_status CHECK (
                status IN ('pending', 'confirmed', 'cancelled', 'completed', 'no_show')
            )
        );
        "#,
    )
    .execute(pool)
    .await?;

    // One active appointment per doctor, date and time
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS uq_appointments_active_slot
            ON appointments(doctor_id, appointment_date, appointment_time)
            WHERE status IN ('confirmed', 'pending');
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_doctors_specialty_id ON doctors(specialty_id);
        CREATE INDEX IF NOT EXISTS idx_appointments_doctor_date ON appointments(doctor_id, appointment_date);
        CREATE INDEX IF NOT EXISTS idx_appointments_status ON appointments(status);
        CREATE INDEX IF NOT EXISTS idx_appointments_patient_email ON appointments(patient_email);
        CREATE INDEX IF NOT EXISTS idx_appointments_patient_phone ON appointments(patient_phone);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
