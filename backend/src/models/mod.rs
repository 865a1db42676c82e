pub mod common;
pub mod invoice;
pub mod meeting;
pub mod payment;
pub mod profile;
pub mod project;
pub mod transaction;
