pub mod app_settings;
pub mod app_state;
pub mod debouncer;
pub mod messages;
pub mod network;
