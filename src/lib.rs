pub mod runner;

mod hook;
pub use hook::*;

mod result;
pub use result::*;

mod spec;
pub use spec::*;

mod suite;
pub use suite::*;

#[cfg(test)]
mod test_support;
