//! Access decision procedure.
//!
//! Pure functions over an [`EntryVisibility`] and an optional requester email.

use super::visibility::EntryVisibility;

/// Decide whether `requester` may read an entry.
///
/// First matching rule wins:
/// 1. public entries are readable by anyone, including anonymous callers;
/// 2. the owner can always read;
/// 3. an allow-listed email can read;
/// 4. everyone else is denied.
///
/// Comparisons ignore case and surrounding whitespace. An absent requester
/// only ever passes rule 1.
pub fn can_view(visibility: &EntryVisibility, requester: Option<&str>) -> bool {
    if visibility.is_public {
        return true;
    }
    let Some(requester) = requester else {
        return false;
    };
    visibility.is_owner(requester) || visibility.allows(requester)
}

/// Decide whether `requester` may change an entry or its sharing settings.
///
/// Owner only. Being able to read (through the allow-list or because the entry
/// is public) grants nothing here.
pub fn can_manage(visibility: &EntryVisibility, requester: &str) -> bool {
    visibility.is_owner(requester)
}
