use serde::{Deserialize, Serialize};

/// A college or university from the catalog. Imported offline from
/// government datasets; the tracker only ever reads these rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Institution {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub website: Option<String>,
}
