//! View-models for the groups page: the list, the detail panel and the
//! member picker.

pub mod details;
pub mod list;
pub mod picker;

pub use details::{GroupDetails, PrivilegeChange};
pub use list::{GroupsView, Loadable, MemberCount};
pub use picker::MemberPicker;
