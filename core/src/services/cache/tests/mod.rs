#[cfg(test)]
mod ttl_cache_tests;
#[cfg(test)]
mod caching_resolver_tests;
