use super::{CellValue, GROUP_SEPARATOR, OutputRow, STATUS_ACTIVE, STATUS_DISABLED};
use crate::users::{MergedUser, UserRecord};
use crate::utils::formatters::{format_epoch_millis_in, format_ldap_timestamp_in};
use crate::utils::{is_truthy, is_truthy_opt};
use chrono::{Local, TimeZone};
use serde_json::Value;
use std::fmt;

/// Flatten a merged user into an output row, dates in local time
#[must_use]
pub fn project(user: &MergedUser) -> OutputRow {
    project_in(user, &Local)
}

/// Flatten every merged user, keeping input order
#[must_use]
pub fn project_all(users: &[MergedUser]) -> Vec<OutputRow> {
    users.iter().map(project).collect()
}

/// Flatten a merged user with dates rendered in `tz`.
///
/// Missing or malformed source values fall back to empty cells; projection
/// never fails.
#[must_use]
pub fn project_in<Tz>(user: &MergedUser, tz: &Tz) -> OutputRow
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let record = user.record();

    OutputRow {
        created_at: created_at(record, tz),
        username: CellValue::from(record.get("username")),
        email_verified: CellValue::from(record.get("emailVerified")),
        last_name: CellValue::from(record.get("lastName")),
        first_name: CellValue::from(record.get("firstName")),
        email: CellValue::from(record.get("email")),
        status: if is_truthy_opt(record.get("enabled")) {
            STATUS_ACTIVE
        } else {
            STATUS_DISABLED
        },
        direction: first_attribute_text(record, "direction").to_string(),
        groups: user.groups_joined(GROUP_SEPARATOR),
        ldap_created_at: format_ldap_timestamp_in(
            first_attribute_text(record, "createTimestamp"),
            tz,
        ),
        ldap_modified_at: format_ldap_timestamp_in(
            first_attribute_text(record, "modifyTimestamp"),
            tz,
        ),
    }
}

/// `createdTimestamp` as a French date, empty when falsy or not a number
fn created_at<Tz>(record: &UserRecord, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let Some(value) = record.get("createdTimestamp").filter(|v| is_truthy(v)) else {
        return String::new();
    };

    // Only JSON numbers are epoch millis; numeric-looking strings are not dates
    #[allow(clippy::cast_possible_truncation)]
    let millis = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        _ => None,
    };

    millis.map_or_else(String::new, |ms| format_epoch_millis_in(ms, tz))
}

/// First string of a multi-valued attribute, or `""`
fn first_attribute_text<'a>(record: &'a UserRecord, name: &str) -> &'a str {
    record
        .first_attribute(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::GroupTag;
    use chrono::Utc;
    use serde_json::json;

    fn merged(value: Value, groups: &[&str]) -> MergedUser {
        let record: UserRecord = serde_json::from_value(value).unwrap();
        let mut user = MergedUser::new(record, GroupTag::new(groups[0]));
        for group in &groups[1..] {
            user.add_group(&GroupTag::new(*group));
        }
        user
    }

    #[test]
    fn test_full_record() {
        let user = merged(
            json!({
                "id": "f1c2",
                "createdTimestamp": 1_700_000_000_000_i64,
                "username": "jdupont",
                "enabled": true,
                "emailVerified": true,
                "firstName": "Jeanne",
                "lastName": "Dupont",
                "email": "jeanne.dupont@example.org",
                "attributes": {
                    "direction": ["DSI"],
                    "createTimestamp": ["20231114221320.0Z"],
                    "modifyTimestamp": ["20240102030405.0Z"]
                }
            }),
            &["admins", "users"],
        );

        let row = project_in(&user, &Utc);
        assert_eq!(row.created_at, "14/11/2023 22:13:20");
        assert_eq!(row.username, CellValue::text("jdupont"));
        assert_eq!(row.email_verified, CellValue::Bool(true));
        assert_eq!(row.last_name, CellValue::text("Dupont"));
        assert_eq!(row.first_name, CellValue::text("Jeanne"));
        assert_eq!(row.email, CellValue::text("jeanne.dupont@example.org"));
        assert_eq!(row.status, "actif");
        assert_eq!(row.direction, "DSI");
        assert_eq!(row.groups, "admins, users");
        assert_eq!(row.ldap_created_at, "14/11/2023 22:13:20");
        assert_eq!(row.ldap_modified_at, "02/01/2024 03:04:05");
    }

    #[test]
    fn test_minimal_record_falls_back() {
        let row = project_in(&merged(json!({ "id": "1" }), &["users"]), &Utc);

        assert_eq!(row.created_at, "");
        assert_eq!(row.username, CellValue::Empty);
        assert_eq!(row.email_verified, CellValue::Empty);
        assert_eq!(row.email, CellValue::Empty);
        assert_eq!(row.status, "désactivé");
        assert_eq!(row.direction, "");
        assert_eq!(row.groups, "users");
        assert_eq!(row.ldap_created_at, "");
    }

    #[test]
    fn test_falsy_timestamp_is_empty() {
        for ts in [json!(0), json!(null), json!(""), json!(false)] {
            let row = project_in(
                &merged(json!({ "id": "1", "createdTimestamp": ts }), &["g"]),
                &Utc,
            );
            assert_eq!(row.created_at, "");
        }
    }

    #[test]
    fn test_string_timestamp_is_not_a_date() {
        for ts in [json!("1700000000000"), json!("2023-11-14")] {
            let row = project_in(
                &merged(json!({ "id": "1", "createdTimestamp": ts }), &["g"]),
                &Utc,
            );
            assert_eq!(row.created_at, "");
        }
    }

    #[test]
    fn test_direction_edge_cases() {
        let cases = [
            json!({ "id": "1", "attributes": {} }),
            json!({ "id": "1", "attributes": { "direction": [] } }),
            json!({ "id": "1", "attributes": { "direction": [""] } }),
            json!({ "id": "1", "attributes": null }),
        ];
        for value in cases {
            assert_eq!(project_in(&merged(value, &["g"]), &Utc).direction, "");
        }
    }

    #[test]
    fn test_projection_keeps_order() {
        let users = vec![
            merged(json!({ "id": "2", "username": "bob" }), &["users"]),
            merged(json!({ "id": "1", "username": "alice" }), &["admins"]),
        ];
        let rows = project_all(&users);
        let names: Vec<_> = rows.iter().map(|r| r.username.clone()).collect();
        assert_eq!(names, [CellValue::text("bob"), CellValue::text("alice")]);
    }
}
