pub mod archive_panel;
pub mod sheets_panel;
