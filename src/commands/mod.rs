pub mod extract;
pub mod merge;
pub mod sheet;
