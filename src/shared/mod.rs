//! Cross-feature building blocks: response envelope, pagination and constants.

pub mod constants;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
