pub mod access;
pub mod gif;
pub mod info;
pub mod maintenance;
pub mod quote;
