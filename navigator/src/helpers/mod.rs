//! Helpers for taking URLs and scheme strings apart.

pub mod url;
