use serde::{Deserialize, Serialize};

/// A book as the API returns it. `id` is assigned by the server and is never
/// sent on create; it is echoed back only when a fetched record populates the
/// edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: u64,
    pub name: String,
    pub author: String,
    pub genre: String,
    pub num_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub des_synopsis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub des_observacao: Option<String>,
    pub flg_completed: bool,
}

/// Request body for create and update: the full record minus the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub name: String,
    pub author: String,
    pub genre: String,
    pub num_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub des_synopsis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub des_observacao: Option<String>,
    pub flg_completed: bool,
}
