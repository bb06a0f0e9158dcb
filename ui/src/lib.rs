//! egui front end for the members admin table.

pub mod app;
pub mod state;
pub mod utils;
pub mod widgets;

pub use app::MembersAdminApp;
