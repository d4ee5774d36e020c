pub mod coin;
pub mod range;
pub mod series;
