//! Teammate matching: ranks stored profiles by shared skills and projects.

pub mod scoring;
