pub mod addr;
pub mod clock;
pub mod cost;
pub mod defs;
pub mod demand;
pub mod error;
pub mod evict;
pub mod frames;
pub mod observe;
pub mod paging;
pub mod request;
pub mod stats;
pub mod working_set;

#[cfg(test)]
mod tests_demand;
#[cfg(test)]
mod tests_evict;
