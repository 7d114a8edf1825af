//! Read-only catalog endpoints. The institution and scholarship tables are
//! populated offline by the data-import jobs; this module only serves them.

pub mod institutions;
pub mod scholarships;
