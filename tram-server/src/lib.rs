//! Tram arrival planner server.
//!
//! Answers: "which tram should I walk to, and when will I get there?"
//! The provider only reports the next arrival per stop and line, so upcoming
//! vehicles are inferred from the countdowns along each line.

pub mod cache;
pub mod catalog;
pub mod planner;
pub mod poll;
pub mod signal;
pub mod web;
