pub mod calculator;
pub mod catalog;
pub mod export;
pub mod models;
pub mod storage;
pub mod store;
pub mod tips;
