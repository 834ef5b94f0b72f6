use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub struct SampleSpecialty {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub struct SampleDoctor {
    pub name: &'static str,
    pub specialty: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub experience_years: i32,
    pub consultation_duration: i32,
    pub working_hours_start: &'static str,
    pub working_hours_end: &'static str,
    pub fee: f64,
    pub bio: &'static str,
}

pub const SAMPLE_SPECIALTIES: [SampleSpecialty; 5] = [
    SampleSpecialty {
        name: "General Medicine",
        description: "Primary care and general checkups",
        icon: "fa-user-md",
    },
    SampleSpecialty {
        name: "Cardiology",
        description: "Diseases of the heart",
        icon: "fa-heartbeat",
    },
    SampleSpecialty {
        name: "Dermatology",
        description: "Skin care and skin conditions",
        icon: "fa-allergies",
    },
    SampleSpecialty {
        name: "Pediatrics",
        description: "Medical care for children and adolescents",
        icon: "fa-baby",
    },
    SampleSpecialty {
        name: "Gynecology",
        description: "Women's health and reproductive care",
        icon: "fa-female",
    },
];

pub const SAMPLE_DOCTORS: [SampleDoctor; 3] = [
    SampleDoctor {
        name: "Dr. Carlos Rodriguez",
        specialty: "General Medicine",
        email: "carlos.rodriguez@clinic.example",
        phone: "+1 234-567-8901",
        experience_years: 15,
        consultation_duration: 30,
        working_hours_start: "08:00",
        working_hours_end: "17:00",
        fee: 60.0,
        bio: "General practitioner with more than 15 years of experience.",
    },
    SampleDoctor {
        name: "Dr. Maria Gonzalez",
        specialty: "Cardiology",
        email: "maria.gonzalez@clinic.example",
        phone: "+1 234-567-8902",
        experience_years: 12,
        consultation_duration: 45,
        working_hours_start: "09:00",
        working_hours_end: "18:00",
        fee: 120.0,
        bio: "Board-certified cardiologist specialised in interventional cardiology.",
    },
    SampleDoctor {
        name: "Dr. Roberto Silva",
        specialty: "Dermatology",
        email: "roberto.silva@clinic.example",
        phone: "+1 234-567-8903",
        experience_years: 8,
        consultation_duration: 20,
        working_hours_start: "10:00",
        working_hours_end: "19:00",
        fee: 80.0,
        bio: "Dermatologist focused on skin disease and aesthetic dermatology.",
    },
];

/// Inserts the sample catalogue. Rows that already exist are left untouched.
pub async fn insert_sample_data(pool: &Pool<Postgres>) -> Result<()> {
    info!("Inserting sample data...");

    for specialty in &SAMPLE_SPECIALTIES {
        sqlx::query(
            r#"
            INSERT INTO specialties (name, description, icon)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(specialty.name)
        .bind(specialty.description)
        .bind(specialty.icon)
        .execute(pool)
        .await?;
    }

    for doctor in &SAMPLE_DOCTORS {
        sqlx::query(
            r#"
            INSERT INTO doctors (
                name, specialty_id, email, phone, experience_years,
                consultation_duration, working_hours_start, working_hours_end, fee, bio
            )
            VALUES ($1, (SELECT id FROM specialties WHERE name = $2), $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(doctor.name)
        .bind(doctor.specialty)
        .bind(doctor.email)
        .bind(doctor.phone)
        .bind(doctor.experience_years)
        .bind(doctor.consultation_duration)
        .bind(doctor.working_hours_start)
        .bind(doctor.working_hours_end)
        .bind(doctor.fee)
        .bind(doctor.bio)
        .execute(pool)
        .await?;
    }

    info!(
        "Sample data ready: {} specialties, {} doctors",
        SAMPLE_SPECIALTIES.len(),
        SAMPLE_DOCTORS.len()
    );
    Ok(())
}
