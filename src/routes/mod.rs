pub mod admin;
pub mod customer;
pub mod events;
pub mod public;
