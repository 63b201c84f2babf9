//! Business services layered over the repositories.

pub mod auth;
pub mod cart;
pub mod catalog;
