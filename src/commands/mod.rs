pub mod add;
pub mod backup;
pub mod delete;
pub mod done;
pub mod list;
pub mod reminders;
pub mod save;
pub mod search;
pub mod show;
pub mod update;
