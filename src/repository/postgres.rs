//! PostgreSQL-backed repository. All values are bound as parameters.

use super::{escape_like, StudentRepository, StudentTransaction};
use crate::error::AppError;
use crate::model::{Student, StudentCourse};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

const STUDENT_COLUMNS: &str = "id, name, kana_name, nickname, email, area, age, sex, remark, is_deleted";
const COURSE_COLUMNS: &str = "id, student_id, course_name, course_start_at, course_end_at, application_status";

#[derive(Clone)]
pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        PgStudentRepository { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn search(&self) -> Result<Vec<Student>, AppError> {
        let sql = format!("SELECT {} FROM students ORDER BY id", STUDENT_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Student>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn search_student(&self, id: i64) -> Result<Option<Student>, AppError> {
        let sql = format!("SELECT {} FROM students WHERE id = $1", STUDENT_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn search_student_course_list(&self) -> Result<Vec<StudentCourse>, AppError> {
        let sql = format!("SELECT {} FROM students_courses ORDER BY id", COURSE_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, StudentCourse>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn search_student_course(&self, student_id: i64) -> Result<Vec<StudentCourse>, AppError> {
        let sql = format!(
            "SELECT {} FROM students_courses WHERE student_id = $1 ORDER BY id",
            COURSE_COLUMNS
        );
        tracing::debug!(sql = %sql, student_id, "query");
        let rows = sqlx::query_as::<_, StudentCourse>(&sql)
            .bind(student_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Student>, AppError> {
        let sql = format!(
            "SELECT {} FROM students WHERE name LIKE '%' || $1 || '%' ESCAPE '\\' AND is_deleted = false ORDER BY id",
            STUDENT_COLUMNS
        );
        let pattern = escape_like(name);
        tracing::debug!(sql = %sql, pattern = %pattern, "query");
        let rows = sqlx::query_as::<_, Student>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Student>, AppError> {
        let sql = format!(
            "SELECT {} FROM students WHERE email = $1 AND is_deleted = false ORDER BY id",
            STUDENT_COLUMNS
        );
        tracing::debug!(sql = %sql, email = %email, "query");
        let rows = sqlx::query_as::<_, Student>(&sql)
            .bind(email)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn begin(&self) -> Result<Box<dyn StudentTransaction>, AppError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgStudentTransaction { tx }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

pub struct PgStudentTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StudentTransaction for PgStudentTransaction {
    async fn register_student(&mut self, student: &Student) -> Result<i64, AppError> {
        let sql = "INSERT INTO students (name, kana_name, nickname, email, area, age, sex, remark, is_deleted) \
                   VALUES ($1, $2, $3, $4, $5, $6, $7, $8, false) RETURNING id";
        tracing::debug!(sql = %sql, "query (tx)");
        let id: i64 = sqlx::query_scalar(sql)
            .bind(&student.name)
            .bind(&student.kana_name)
            .bind(&student.nickname)
            .bind(&student.email)
            .bind(&student.area)
            .bind(student.age)
            .bind(&student.sex)
            .bind(&student.remark)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(id)
    }

    async fn register_student_course(&mut self, course: &StudentCourse) -> Result<i64, AppError> {
        let sql = "INSERT INTO students_courses (student_id, course_name, course_start_at, course_end_at, application_status) \
                   VALUES ($1, $2, $3, $4, $5) RETURNING id";
        tracing::debug!(sql = %sql, student_id = ?course.student_id, "query (tx)");
        let id: i64 = sqlx::query_scalar(sql)
            .bind(course.student_id)
            .bind(&course.course_name)
            .bind(course.course_start_at)
            .bind(course.course_end_at)
            .bind(course.application_status)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(id)
    }

    async fn update_student(&mut self, student: &Student) -> Result<u64, AppError> {
        let sql = "UPDATE students SET name = $1, kana_name = $2, nickname = $3, email = $4, area = $5, \
                   age = $6, sex = $7, remark = $8, is_deleted = $9 WHERE id = $10";
        tracing::debug!(sql = %sql, id = ?student.id, "query (tx)");
        let result = sqlx::query(sql)
            .bind(&student.name)
            .bind(&student.kana_name)
            .bind(&student.nickname)
            .bind(&student.email)
            .bind(&student.area)
            .bind(student.age)
            .bind(&student.sex)
            .bind(&student.remark)
            .bind(student.is_deleted)
            .bind(student.id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    async fn update_student_course(&mut self, student_id: i64, course: &StudentCourse) -> Result<u64, AppError> {
        let sql = "UPDATE students_courses SET course_name = $1, application_status = $2 \
                   WHERE id = $3 AND student_id = $4";
        tracing::debug!(sql = %sql, id = ?course.id, student_id, "query (tx)");
        let result = sqlx::query(sql)
            .bind(&course.course_name)
            .bind(course.application_status)
            .bind(course.id)
            .bind(student_id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let this = *self;
        this.tx.commit().await?;
        Ok(())
    }
}
