mod config;
pub mod http;
pub mod members;

pub use config::{BusinessConfig, DEFAULT_MEMBERS_URL, DEFAULT_PAGE_SIZE, EditMode};
pub use members::{
    LoadMembersCommand, Member, MemberField, MemberKey, MembersLoadResult, MembersLoadStatus,
    MembersTableState, PageItem, apply_settled_load,
};
