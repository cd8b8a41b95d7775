use super::{GroupSource, MergedUser};
use anyhow::Result;
use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{Level, debug, span};

/// Merge group sources into deduplicated users tagged with their groups.
///
/// Users are keyed by `id`. The first sighting supplies the attributes; later
/// sightings only add their group tag when it is new. Output order is the
/// first-seen order of ids, walking sources in order and users in file order.
///
/// # Errors
///
/// Returns an error if a record has no `id` or its `id` is not a string.
pub fn merge_groups<'a, I>(sources: I) -> Result<Vec<MergedUser>>
where
    I: IntoIterator<Item = &'a GroupSource>,
{
    let span = span!(Level::DEBUG, "merge_groups");
    let _guard = span.enter();

    let mut users: IndexMap<String, MergedUser> = IndexMap::new();

    for source in sources {
        let mut added = 0usize;
        for (position, record) in source.users.iter().enumerate() {
            let Some(id) = record.id() else {
                anyhow::bail!(
                    "User #{} in group '{}' has no string `id`",
                    position + 1,
                    source.tag
                );
            };

            match users.entry(id.to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(MergedUser::new(record.clone(), source.tag.clone()));
                    added += 1;
                }
                Entry::Occupied(mut slot) => {
                    slot.get_mut().add_group(&source.tag);
                }
            }
        }
        debug!(
            group = %source.tag,
            records = source.users.len(),
            new_users = added,
            "Merged group"
        );
    }

    Ok(users.into_values().collect())
}
