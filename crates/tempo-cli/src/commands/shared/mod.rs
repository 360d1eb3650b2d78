pub mod clock;
pub mod limit;
pub mod parse;
pub mod resolve;
