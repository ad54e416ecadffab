pub mod list;
pub mod page;
pub mod redirect;
pub mod shorten;
