//! Use cases (application services)

pub mod decide_extension;
pub mod generate_review;
pub mod generate_turn;
pub mod run_debate;

#[cfg(test)]
pub(crate) mod test_support;
