pub mod connection;
pub mod entity;
pub mod filter;
pub mod repository;
pub mod tables;
pub mod unit_of_work;

pub use connection::{init_db, Database};
pub use entity::{Entity, SoftDeletable, Visibility};
pub use filter::{Filter, Order, Predicate};
pub use repository::{BypassRepository, Repository};
pub use unit_of_work::UnitOfWork;
