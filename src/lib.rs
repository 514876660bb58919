//! Dancefloor library exports for testing

pub mod core;
pub mod geocode;
pub mod location;
pub mod tui;

#[cfg(test)]
pub mod test_support;
