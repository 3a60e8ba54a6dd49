// Service module exports

pub mod block;
pub mod database;
pub mod lanes;
pub mod multi_day;
pub mod settings;
pub mod storage;
