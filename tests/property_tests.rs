use proptest::prelude::*;
use realm_export::export::project_all;
use realm_export::users::merge::merge_groups;
use realm_export::users::{GroupSource, GroupTag, UserRecord};
use serde_json::{Map, Value};
use std::collections::HashSet;

fn user(id: &str) -> UserRecord {
    let mut fields = Map::new();
    fields.insert("id".to_string(), Value::String(id.to_string()));
    UserRecord::new(fields)
}

/// Up to six groups, each listing ids drawn from a small pool so overlaps are common
fn group_sources() -> impl Strategy<Value = Vec<GroupSource>> {
    prop::collection::vec(prop::collection::vec(0u8..12, 0..10), 0..6).prop_map(|groups| {
        groups
            .into_iter()
            .enumerate()
            .map(|(index, ids)| {
                let users = ids.iter().map(|id| user(&format!("user-{id}"))).collect();
                GroupSource::new(GroupTag::new(format!("group-{index}")), users)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn test_merge_completeness(sources in group_sources()) {
        // Invariant: one merged user per distinct id
        let merged = merge_groups(&sources).unwrap();
        let distinct: HashSet<_> = sources
            .iter()
            .flat_map(|s| s.users.iter().filter_map(UserRecord::id))
            .collect();

        prop_assert_eq!(merged.len(), distinct.len());
    }

    #[test]
    fn test_groups_are_unique_and_in_file_order(sources in group_sources()) {
        let merged = merge_groups(&sources).unwrap();

        for user in &merged {
            let id = user.id().unwrap();
            let expected: Vec<&GroupTag> = sources
                .iter()
                .filter(|s| s.users.iter().any(|u| u.id() == Some(id)))
                .map(|s| &s.tag)
                .collect();
            let actual: Vec<&GroupTag> = user.groups().iter().collect();
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_order_is_first_seen(sources in group_sources()) {
        let merged = merge_groups(&sources).unwrap();

        let mut seen = HashSet::new();
        let first_seen: Vec<&str> = sources
            .iter()
            .flat_map(|s| s.users.iter().filter_map(UserRecord::id))
            .filter(|id| seen.insert(*id))
            .collect();
        let ids: Vec<&str> = merged.iter().filter_map(|u| u.id()).collect();

        prop_assert_eq!(ids, first_seen);
    }

    #[test]
    fn test_merge_is_idempotent(sources in group_sources()) {
        prop_assert_eq!(merge_groups(&sources).unwrap(), merge_groups(&sources).unwrap());
    }

    #[test]
    fn test_projection_is_one_to_one(sources in group_sources()) {
        let merged = merge_groups(&sources).unwrap();
        let rows = project_all(&merged);

        prop_assert_eq!(rows.len(), merged.len());
        for (row, user) in rows.iter().zip(&merged) {
            prop_assert_eq!(&row.groups, &user.groups_joined(", "));
        }
    }
}
