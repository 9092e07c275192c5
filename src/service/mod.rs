pub mod activity_log;
pub mod backup_status;
pub mod paths;
pub mod site_time;
pub mod tip_link;
pub mod translate;
