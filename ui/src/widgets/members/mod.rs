//! Members admin panel.
//!
//! - `toolbar`: search box and bulk delete
//! - `table`: header, rows and cells
//! - `pagination`: centered page control with quick jump
//! - `panel`: ties them together against `MembersTableState`

mod pagination;
mod panel;
pub mod table;
mod toolbar;

pub use panel::members_panel;
pub use table::TableIntent;
