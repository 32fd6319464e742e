pub mod api;
pub mod db;
pub mod models;
pub mod scanner;
pub mod shift;
