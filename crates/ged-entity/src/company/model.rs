//! Company listing models used by environment selection.

use serde::{Deserialize, Serialize};

use ged_core::types::{CompanyId, LinkId, UserId};

use crate::link::LinkStatus;
use crate::permission::PermissionSet;
use crate::principal::AccountKind;

/// A company a user is linked to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySummary {
    /// The link id.
    pub id: LinkId,
    /// The company id.
    pub business_id: CompanyId,
    /// Kind of the company.
    pub business_type: AccountKind,
    /// Name to display.
    #[serde(default)]
    pub nome_exibicao: Option<String>,
    /// Registered company name.
    #[serde(default)]
    pub razao_social: Option<String>,
    /// Company tax id.
    #[serde(default)]
    pub cnpj: Option<String>,
    /// Personal tax id.
    #[serde(default)]
    pub cpf: Option<String>,
    /// City.
    #[serde(default)]
    pub cidade: Option<String>,
    /// State.
    #[serde(default)]
    pub estado: Option<String>,
    /// Link status.
    #[serde(default)]
    pub status: LinkStatus,
    /// Capabilities granted through the link.
    #[serde(default)]
    pub permissions: Option<PermissionSet>,
}

impl CompanySummary {
    /// Name to show in selectors.
    pub fn label(&self) -> String {
        self.nome_exibicao
            .clone()
            .or_else(|| self.razao_social.clone())
            .unwrap_or_else(|| format!("company #{}", self.business_id))
    }
}

/// The user a company listing was requested for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedUser {
    /// User id.
    pub user_id: UserId,
    /// Kind of the user.
    pub type_user: AccountKind,
    /// Email.
    pub email: String,
}

/// Companies linked to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompaniesResponse {
    /// The user listed.
    pub user: LinkedUser,
    /// Linked companies.
    #[serde(default)]
    pub companies: Vec<CompanySummary>,
    /// Number of linked companies.
    #[serde(default)]
    pub total_companies: u64,
}
