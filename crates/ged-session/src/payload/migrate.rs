//! Upgrading legacy login payloads to the current schema.
//!
//! Payloads written by the web client carry no `version`. Their
//! `permissions` field is an object for collaborators but, for owners,
//! usually a list of plan-code lists such as `[["GEDMASTER","GEDADM"]]`.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use ged_core::error::{AppError, ErrorKind};
use ged_core::result::AppResult;

use super::schema::{CURRENT_VERSION, StoredLogin};

/// Whether `raw` predates the current schema.
pub fn needs_migration(raw: &Value) -> bool {
    raw.get("version").and_then(Value::as_u64) != Some(u64::from(CURRENT_VERSION))
}

/// Parse a payload of any known version into the current schema.
pub fn migrate(raw: Value) -> AppResult<StoredLogin> {
    let Value::Object(mut map) = raw else {
        return Err(AppError::session("Login payload is not a JSON object"));
    };

    match map.get("version").and_then(Value::as_u64) {
        Some(v) if v == u64::from(CURRENT_VERSION) => return parse(map),
        Some(v) if v > u64::from(CURRENT_VERSION) => {
            return Err(AppError::session(format!(
                "Login payload version {v} is newer than this client supports"
            )));
        }
        _ => {}
    }

    let is_collaborator = map
        .get("is_collaborator")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    upgrade_permissions(&mut map, is_collaborator);
    upgrade_user(&mut map);
    drop_blank(&mut map, "company_id");
    drop_blank(&mut map, "company_type");

    map.insert("version".into(), Value::from(CURRENT_VERSION));
    debug!(is_collaborator, "Migrated legacy login payload");
    parse(map)
}

fn parse(map: Map<String, Value>) -> AppResult<StoredLogin> {
    serde_json::from_value(Value::Object(map)).map_err(|e| {
        AppError::with_source(ErrorKind::Session, format!("Invalid login payload: {e}"), e)
    })
}

fn upgrade_permissions(map: &mut Map<String, Value>, is_collaborator: bool) {
    match map.get("permissions") {
        None | Some(Value::Object(_)) => {}
        Some(Value::Null) => {
            map.remove("permissions");
        }
        Some(_) if is_collaborator => {
            warn!("Collaborator payload has non-object permissions, denying all");
            map.remove("permissions");
        }
        Some(_) => {
            debug!("Dropping legacy plan-code permissions of an owner");
            map.remove("permissions");
        }
    }
}

/// Older payloads kept the id at the top level next to a partial user.
fn upgrade_user(map: &mut Map<String, Value>) {
    let top_id = map.get("id").cloned().filter(|v| !v.is_null());
    match map.get_mut("user") {
        Some(Value::Object(user)) => {
            if user.get("id").is_none_or(Value::is_null) {
                if let Some(id) = top_id {
                    user.insert("id".into(), id);
                }
            }
        }
        _ => {
            if let Some(id) = top_id {
                let mut user = Map::new();
                user.insert("id".into(), id);
                for key in ["nome", "name", "email"] {
                    if let Some(v) = map.get(key).filter(|v| v.is_string()) {
                        user.insert(key.into(), v.clone());
                    }
                }
                map.insert("user".into(), Value::Object(user));
            }
        }
    }
}

fn drop_blank(map: &mut Map<String, Value>, key: &str) {
    let blank = match map.get(key) {
        Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => false,
    };
    if blank {
        map.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ged_core::types::{CompanyId, UserId};
    use ged_entity::permission::PermissionSet;
    use ged_entity::principal::AccountKind;
    use serde_json::json;

    #[test]
    fn test_owner_plan_codes_are_dropped() {
        let raw = json!({
            "message": "ok",
            "user": {"id": 5, "nome": "Ana"},
            "permissions": [["GEDMASTER", "GEDADM"]],
            "tipo": "PJ",
        });
        assert!(needs_migration(&raw));
        let login = migrate(raw).unwrap();
        assert_eq!(login.version, CURRENT_VERSION);
        assert!(login.permissions.is_none());
        assert_eq!(login.account_kind(), AccountKind::Organization);
    }

    #[test]
    fn test_collaborator_keeps_object_permissions() {
        let login = migrate(json!({
            "user": {"id": 9, "name": "Bia"},
            "permissions": {"manage_files": true, "view_metrics": false},
            "tipo": "Colaborador",
            "company_id": "3",
            "company_type": "pf",
            "is_collaborator": true,
        }))
        .unwrap();
        let perms = login.permissions.unwrap();
        assert!(perms.manage_files);
        assert!(!perms.view_metrics);
        assert_eq!(login.company_id, Some(CompanyId(3)));
    }

    #[test]
    fn test_collaborator_non_object_permissions_become_absent() {
        let login = migrate(json!({
            "user": {"id": 9},
            "permissions": [["GEDCOLAB"]],
            "is_collaborator": true,
            "company_id": 3,
        }))
        .unwrap();
        assert!(login.permissions.is_none());
        assert!(login.is_collaborator);
    }

    #[test]
    fn test_top_level_id_fallback() {
        let login = migrate(json!({"id": "44", "nome": "Caio", "tipo": "PF"})).unwrap();
        assert_eq!(login.user.id, UserId(44));
        assert_eq!(login.user.display_name().as_deref(), Some("Caio"));
    }

    #[test]
    fn test_missing_user_id_is_session_error() {
        let err = migrate(json!({"user": {"nome": "x"}, "tipo": "PF"})).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Session);
        let err = migrate(json!("not an object")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Session);
    }

    #[test]
    fn test_current_version_passes_through() {
        let raw = json!({
            "version": 2,
            "user": {"id": 1},
            "tipo": "Freelancer",
            "company_id": 8,
            "company_type": "pj",
            "permissions": PermissionSet::owner_defaults(),
        });
        assert!(!needs_migration(&raw));
        let login = migrate(raw).unwrap();
        assert_eq!(login.permissions, Some(PermissionSet::owner_defaults()));
    }

    #[test]
    fn test_future_version_rejected() {
        assert!(migrate(json!({"version": 3, "user": {"id": 1}})).is_err());
    }
}
