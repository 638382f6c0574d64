pub mod commit;
pub mod ls;
pub mod show;
