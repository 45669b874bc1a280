use crate::model::id::deserialize_optional_id;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::encode::{Encode, IsNull};
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgTypeInfo, PgValueRef, Postgres};
use sqlx::{Database, Decode};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Lifecycle stage of an enrollment. Stored as free text; closed at the API boundary.
/// The Japanese labels used by older clients and rows are accepted on input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ApplicationStatus {
    #[serde(rename = "provisional application", alias = "仮申込")]
    ProvisionalApplication,
    #[serde(rename = "formal application", alias = "本申込")]
    FormalApplication,
    #[serde(rename = "in progress", alias = "受講中")]
    InProgress,
    #[serde(rename = "completed", alias = "受講終了")]
    Completed,
}

#[derive(Error, Debug)]
#[error("unknown application status: '{0}'")]
pub struct UnknownApplicationStatus(pub String);

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::ProvisionalApplication => "provisional application",
            ApplicationStatus::FormalApplication => "formal application",
            ApplicationStatus::InProgress => "in progress",
            ApplicationStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = UnknownApplicationStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "provisional application" | "仮申込" => Ok(ApplicationStatus::ProvisionalApplication),
            "formal application" | "本申込" => Ok(ApplicationStatus::FormalApplication),
            "in progress" | "受講中" => Ok(ApplicationStatus::InProgress),
            "completed" | "受講終了" => Ok(ApplicationStatus::Completed),
            other => Err(UnknownApplicationStatus(other.to_string())),
        }
    }
}

impl sqlx::Type<Postgres> for ApplicationStatus {
    fn type_info() -> PgTypeInfo {
        <&str as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <&str as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'q> Encode<'q, Postgres> for ApplicationStatus {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        <&str as Encode<Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> Decode<'r, Postgres> for ApplicationStatus {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let text = <&str as Decode<Postgres>>::decode(value)?;
        Ok(text.parse::<ApplicationStatus>()?)
    }
}

/// One row of `students_courses`. Start/end timestamps are set by registration, not by clients.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentCourse {
    #[serde(deserialize_with = "deserialize_optional_id")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "deserialize_optional_id")]
    pub student_id: Option<i64>,
    pub course_name: String,
    pub course_start_at: Option<NaiveDateTime>,
    pub course_end_at: Option<NaiveDateTime>,
    pub application_status: Option<ApplicationStatus>,
}
