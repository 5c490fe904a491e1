pub mod app_settings;
pub mod app_state;
pub mod clock;
pub mod commentary;
pub mod editor;
pub mod messages;
