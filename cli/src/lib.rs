pub mod driver;
pub mod flags;
pub mod logger;
pub mod parse;
pub mod report;
pub mod swaplog;
pub mod trace;
