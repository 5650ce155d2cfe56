pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod images;
pub mod seed;
pub mod services;

#[cfg(test)]
mod tests;
