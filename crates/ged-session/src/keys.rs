//! Storage keys for every persisted session entry.
//!
//! These names are the on-disk format shared with the web client, so they
//! must not change.

/// The login payload (JSON).
pub const LOGIN_PAYLOAD: &str = "infosUserLogin";

/// Bearer token.
pub const TOKEN: &str = "token";

/// Active company selector: a company id or `own`.
pub const SELECTED_COMPANY: &str = "selectedCompanyId";

/// Kind of the selected company.
pub const SELECTED_BUSINESS_TYPE: &str = "selectedBusinessType";

/// UI language.
pub const LANGUAGE: &str = "lng";

/// Account kind label as returned at login.
pub const USER_TYPE: &str = "userType";

/// Lowercase account kind.
pub const TYPE_USER: &str = "type_user";

