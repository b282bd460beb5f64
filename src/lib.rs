//! askai library exports for testing

pub mod completion;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;
