pub mod clean;
pub mod corpus;
pub mod fetch;
pub mod segment;
pub mod status;
pub mod verses;
pub mod workbook;
