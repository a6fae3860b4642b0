//! Domain entities and their validated construction.
//!
//! # Responsibility
//! - Define the persisted entity shapes (student, test record, like edge).
//! - Provide factory construction that derives defaults and validates before
//!   returning.
//!
//! # Invariants
//! - A constructed entity is fully valid or construction fails; no partially
//!   valid entity ever reaches a DAO.
//! - Factories surface every violated field at once, not just the first.

pub mod like;
pub mod student;
pub mod test_record;
