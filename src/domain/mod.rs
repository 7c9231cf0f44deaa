//! Domain Layer - Wire schemas on both sides of the translation
//!
//! Typed representations of the upstream (Harbor) vulnerability report and
//! the downstream (CSO) security response. Pure data, no behavior; callers
//! use the qualified module paths to make clear which side of the wire a
//! type belongs to.

pub mod harbor;
pub mod secscan;
