#[cfg(test)]
mod mysql_tests;
