pub mod edit;
#[cfg(test)]
pub mod fixtures;
pub mod resume;
