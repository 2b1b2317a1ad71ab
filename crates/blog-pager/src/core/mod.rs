pub mod limits;
pub mod pager;
pub mod search;
pub mod types;
pub mod window;
