#[cfg(test)]
mod token_tests;
