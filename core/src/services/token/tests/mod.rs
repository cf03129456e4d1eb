#[cfg(test)]
mod refresher_tests;
#[cfg(test)]
mod revoker_tests;
