pub mod confirm_dialog;
pub mod empty_state;
pub mod grants_list;
pub mod group_panel;
pub mod member_count;
pub mod member_picker;
pub mod members_list;
pub mod metadata;
pub mod notice_banner;
pub mod server_status;
pub mod sidebar;
