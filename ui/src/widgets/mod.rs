mod members;

pub use members::{TableIntent, members_panel};
