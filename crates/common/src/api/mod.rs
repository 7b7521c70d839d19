pub mod insights;
pub mod optimize;
pub mod solver;
