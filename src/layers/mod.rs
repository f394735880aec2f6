pub mod base;
pub mod earthquake;
pub mod macros;
pub mod manager;
pub mod marker;
pub mod tile;
