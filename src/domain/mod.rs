pub mod colname;
pub mod diff;
pub mod entities;
pub mod grid;
