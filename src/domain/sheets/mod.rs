pub mod a1_notation;
pub mod cell_address;
pub mod resolver;
pub mod row;
pub mod sheet_link;
