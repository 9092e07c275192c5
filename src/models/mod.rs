pub mod backup_changes;
pub mod backup_record;
pub mod backup_state;
pub mod config;
pub mod config_validator;
pub mod display_context;
pub mod editor_env;
pub mod error;
pub mod tip_section;
