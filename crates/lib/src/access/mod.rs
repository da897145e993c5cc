//! Entry visibility and access decisions
//!
//! Every journal entry carries an [`EntryVisibility`]. Reads are decided by
//! [`can_view`]; mutations, including sharing-settings changes, by the stricter
//! [`can_manage`].

pub mod errors;
mod policy;
mod visibility;

pub use errors::AccessError;
pub use policy::{can_manage, can_view};
pub use visibility::{DisclosureState, EntryVisibility, normalize_allowed_emails};
