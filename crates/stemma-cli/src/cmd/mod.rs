//! Command handlers, one module per subcommand.

pub mod add;
pub mod delete;
pub mod edit;
pub mod import;
pub mod layout;
pub mod list;
pub mod me;
pub mod share;
pub mod show;
pub mod verify;
pub mod view;
