//! Exam prep companion for an embedded-systems course.
//!
//! The library holds the cheat-sheet store and paginator, the practice quiz
//! session, the static concept guide, view routing and the exam countdown.
//! Front ends live in `src/bin`.

pub mod cheatsheet;
pub mod concepts;
pub mod config;
pub mod countdown;
pub mod publish;
pub mod quiz;
pub mod router;
pub mod storage;
