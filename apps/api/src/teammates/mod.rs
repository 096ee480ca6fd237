//! Teammate discovery: filtered search and paginated listing of stored profiles.

pub mod handlers;
pub mod search;
