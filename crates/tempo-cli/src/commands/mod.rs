pub mod audit;
pub mod customer;
pub mod dispatch;
pub mod export;
pub mod issue;
pub mod label;
pub mod milestone;
pub mod project;
pub mod report;
pub mod schema;
pub mod shared;
pub mod sprint;
pub mod tag;
pub mod task;
pub mod timer;
