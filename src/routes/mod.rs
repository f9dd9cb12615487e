pub mod account;
pub mod blocks;
pub mod departments;
pub mod health;
pub mod page;
