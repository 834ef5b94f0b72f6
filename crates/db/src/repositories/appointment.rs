use crate::models::DbAppointment;
use chrono::NaiveDate;
use clinic_core::models::appointment::{
    AppointmentFilter, AppointmentStatus, ListOrder, NewAppointment, PatientLookup,
};
use eyre::Result;
use sqlx::{Pool, Postgres};

/// Columns of an appointment row `a` joined with doctor `d` and specialty `s`.
const APPOINTMENT_PROJECTION: &str = r#"
    a.id, a.doctor_id, a.patient_name, a.patient_email, a.patient_phone,
    a.appointment_date, a.appointment_time, a.duration, a.status, a.reason,
    a.notes, a.created_at, a.updated_at, d.name AS doctor_name,
    s.name AS specialty_name, s.icon AS specialty_icon
"#;

const APPOINTMENT_JOINS: &str = r#"
    LEFT JOIN doctors d ON a.doctor_id = d.id
    LEFT JOIN specialties s ON d.specialty_id = s.id
"#;

pub async fn find_active_appointment_id(
    pool: &Pool<Postgres>,
    doctor_id: i64,
    date: NaiveDate,
    time: &str,
) -> Result<Option<i64>> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT id
        FROM appointments
        WHERE doctor_id = $1 AND appointment_date = $2 AND appointment_time = $3
          AND status IN ('confirmed', 'pending')
        LIMIT 1
        "#,
    )
    .bind(doctor_id)
    .bind(date)
    .bind(time)
    .fetch_optional(pool)
    .await?;

    Ok(id)
}

/// Inserts a booking. A concurrent active booking of the same slot makes this
/// fail on the `uq_appointments_active_slot` index.
pub async fn insert_appointment(
    pool: &Pool<Postgres>,
    appointment: &NewAppointment,
) -> Result<DbAppointment> {
    tracing::debug!(
        "Inserting appointment: doctor_id={}, date={}, time={}",
        appointment.doctor_id,
        appointment.appointment_date,
        appointment.appointment_time
    );

    let query = format!(
        r#"
        WITH a AS (
            INSERT INTO appointments (
                doctor_id, patient_name, patient_email, patient_phone,
                appointment_date, appointment_time, duration, status, reason, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
        )
        SELECT {APPOINTMENT_PROJECTION}
        FROM a
        {APPOINTMENT_JOINS}
        "#
    );

    let created = sqlx::query_as::<_, DbAppointment>(&query)
        .bind(appointment.doctor_id)
        .bind(&appointment.patient_name)
        .bind(&appointment.patient_email)
        .bind(&appointment.patient_phone)
        .bind(appointment.appointment_date)
        .bind(&appointment.appointment_time)
        .bind(appointment.duration)
        .bind(appointment.status.as_str())
        .bind(&appointment.reason)
        .bind(&appointment.notes)
        .fetch_one(pool)
        .await?;

    Ok(created)
}

pub async fn get_appointment_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbAppointment>> {
    let query = format!(
        r#"
        SELECT {APPOINTMENT_PROJECTION}
        FROM appointments a
        {APPOINTMENT_JOINS}
        WHERE a.id = $1
        "#
    );

    let appointment = sqlx::query_as::<_, DbAppointment>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(appointment)
}

pub async fn update_appointment_status(
    pool: &Pool<Postgres>,
    id: i64,
    status: AppointmentStatus,
) -> Result<Option<DbAppointment>> {
    let query = format!(
        r#"
        WITH a AS (
            UPDATE appointments
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
        )
        SELECT {APPOINTMENT_PROJECTION}
        FROM a
        {APPOINTMENT_JOINS}
        "#
    );

    let appointment = sqlx::query_as::<_, DbAppointment>(&query)
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(appointment)
}

pub async fn list_appointments(
    pool: &Pool<Postgres>,
    filter: &AppointmentFilter,
) -> Result<Vec<DbAppointment>> {
    let order = match filter.order {
        ListOrder::NewestFirst => "a.appointment_date DESC, a.appointment_time DESC",
        ListOrder::Chronological => "a.appointment_date ASC, a.appointment_time ASC",
    };

    let query = format!(
        r#"
        SELECT {APPOINTMENT_PROJECTION}
        FROM appointments a
        {APPOINTMENT_JOINS}
        WHERE ($1::BIGINT IS NULL OR a.doctor_id = $1)
          AND ($2::TEXT IS NULL OR a.status = $2)
          AND ($3::DATE IS NULL OR a.appointment_date = $3)
        ORDER BY {order}
        "#
    );

    let appointments = sqlx::query_as::<_, DbAppointment>(&query)
        .bind(filter.doctor_id)
        .bind(filter.status.map(|status| status.as_str()))
        .bind(filter.date)
        .fetch_all(pool)
        .await?;

    Ok(appointments)
}

pub async fn find_patient_appointments(
    pool: &Pool<Postgres>,
    lookup: &PatientLookup,
) -> Result<Vec<DbAppointment>> {
    let (email, phone, require_both) = match lookup {
        PatientLookup::Email(email) => (Some(email.as_str()), None, false),
        PatientLookup::Phone(phone) => (None, Some(phone.as_str()), false),
        PatientLookup::EmailAndPhone { email, phone } => {
            (Some(email.as_str()), Some(phone.as_str()), true)
        }
    };

    let query = format!(
        r#"
        SELECT {APPOINTMENT_PROJECTION}
        FROM appointments a
        {APPOINTMENT_JOINS}
        WHERE CASE
            WHEN $3 THEN a.patient_email = $1 AND a.patient_phone = $2
            ELSE COALESCE(a.patient_email = $1, FALSE) OR COALESCE(a.patient_phone = $2, FALSE)
        END
        ORDER BY a.appointment_date DESC, a.appointment_time DESC
        "#
    );

    let appointments = sqlx::query_as::<_, DbAppointment>(&query)
        .bind(email)
        .bind(phone)
        .bind(require_both)
        .fetch_all(pool)
        .await?;

    Ok(appointments)
}

pub async fn get_booked_times(
    pool: &Pool<Postgres>,
    doctor_id: i64,
    date: NaiveDate,
) -> Result<Vec<String>> {
    let times = sqlx::query_scalar::<_, String>(
        r#"
        SELECT appointment_time
        FROM appointments
        WHERE doctor_id = $1 AND appointment_date = $2
          AND status IN ('confirmed', 'pending')
        ORDER BY appointment_time ASC
        "#,
    )
    .bind(doctor_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(times)
}
