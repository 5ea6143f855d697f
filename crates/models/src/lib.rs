//! SeaORM entities for the enrollment store: `student`, `course` and the
//! `enrollments` join table, plus connection helpers.

pub mod errors;
pub mod db;
pub mod student;
pub mod course;
pub mod enrollment;

#[cfg(test)]
mod tests;
