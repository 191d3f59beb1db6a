pub mod db;
pub mod fetch;
pub mod storage;
pub mod utils;
pub mod web;
