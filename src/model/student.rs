use crate::model::id::deserialize_optional_id;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of `students`. `id` is unset until the store assigns it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Student {
    #[serde(deserialize_with = "deserialize_optional_id")]
    pub id: Option<i64>,
    pub name: String,
    /// Phonetic reading of `name`.
    pub kana_name: String,
    pub nickname: String,
    pub email: String,
    pub area: String,
    pub age: Option<i32>,
    pub sex: String,
    pub remark: Option<String>,
    /// Logical-delete flag; rows are never physically removed. Legacy clients send
    /// `deleted`; a body carrying both `isDeleted` and `deleted` is a duplicate field
    /// and is rejected.
    #[serde(alias = "deleted")]
    pub is_deleted: bool,
}
