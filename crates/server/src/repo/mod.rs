pub mod records;
pub mod search;
