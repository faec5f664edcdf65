pub mod add_group;
pub mod groups;

pub use add_group::AddGroup;
pub use groups::Groups;
