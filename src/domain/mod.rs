pub mod audit;
pub mod catalog;
pub mod enums;
pub mod listing;
pub mod logic;
pub mod requests;
pub mod user;
pub mod vehicle;
pub mod views;
