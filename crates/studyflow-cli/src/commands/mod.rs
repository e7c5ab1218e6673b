pub mod config;
pub mod recommend;
pub mod session;
pub mod subject;
pub mod task;
pub mod timer;
