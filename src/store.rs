//! Database bootstrap: create the target database if missing, then the two tables.

use crate::error::{AppError, ConfigError};
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const STUDENTS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS students (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        kana_name TEXT NOT NULL,
        nickname TEXT NOT NULL,
        email TEXT NOT NULL,
        area TEXT NOT NULL,
        age INTEGER,
        sex TEXT NOT NULL,
        remark TEXT,
        is_deleted BOOLEAN NOT NULL DEFAULT FALSE
    )
"#;

const STUDENTS_COURSES_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS students_courses (
        id BIGSERIAL PRIMARY KEY,
        student_id BIGINT NOT NULL REFERENCES students (id),
        course_name TEXT NOT NULL,
        course_start_at TIMESTAMP,
        course_end_at TIMESTAMP,
        application_status TEXT
    )
"#;

const STUDENTS_COURSES_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS students_courses_student_id_idx ON students_courses (student_id)";

/// Create `students` and `students_courses` if they do not exist. Safe to run on every start.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in [STUDENTS_DDL, STUDENTS_COURSES_DDL, STUDENTS_COURSES_INDEX] {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::debug!("student tables ready");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, target) = split_database(database_url)?;
    let db_name = match target {
        Some(name) if !name.is_empty() && name != "postgres" => name,
        _ => return Ok(()),
    };
    let mut conn: sqlx::PgConnection = admin.connect().await.map_err(AppError::Db)?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await
        .map_err(AppError::Db)?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await
            .map_err(AppError::Db)?;
    }
    Ok(())
}

/// Options for the admin `postgres` database (host, credentials and query options kept)
/// and the database named in `url`, if it names one.
fn split_database(url: &str) -> Result<(PgConnectOptions, Option<String>), AppError> {
    let opts = PgConnectOptions::from_str(url).map_err(|_| ConfigError::InvalidValue {
        key: "DATABASE_URL",
        value: url.to_string(),
    })?;
    let target = opts.get_database().map(str::to_owned);
    Ok((opts.database("postgres"), target))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
