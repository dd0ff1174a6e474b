//! Company registry entity model, DTOs, and the pipeline snapshot.

use foundernest_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `companies` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Company {
    pub id: DbId,
    pub name: String,
    pub url: Option<String>,
    #[serde(rename = "ceoName")]
    pub ceo_name: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new company.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCompany {
    pub name: String,
    pub url: Option<String>,
    #[serde(rename = "ceoName", alias = "ceo_name")]
    pub ceo_name: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
}

/// Copy of a company embedded in a pipeline entry.
///
/// Taken when the entry is created and never refreshed: later edits or the
/// deletion of the registry row leave existing snapshots as they are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySnapshot {
    pub id: DbId,
    pub name: String,
    pub url: Option<String>,
    #[serde(rename = "ceoName", alias = "ceo_name")]
    pub ceo_name: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
}

impl From<&Company> for CompanySnapshot {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id,
            name: company.name.clone(),
            url: company.url.clone(),
            ceo_name: company.ceo_name.clone(),
            email: company.email.clone(),
            telephone: company.telephone.clone(),
        }
    }
}
