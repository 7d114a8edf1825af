pub mod college;
pub mod institution;
pub mod scholarship;
