//! Members table: model, endpoint client, load command and table state.

pub mod api;
pub mod load;
pub mod model;
pub mod table;

pub use api::{ApiResult, MembersApiError, fetch_members};
pub use load::{LoadMembersCommand, MembersLoadResult, MembersLoadStatus, apply_settled_load};
pub use model::{Member, MemberField, MemberKey, MemberPayload};
pub use table::{MembersTableState, PageItem, page_items};
