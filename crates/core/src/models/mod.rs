pub mod chart;
pub mod coin;
pub mod page;
pub mod portfolio;
pub mod range;
pub mod series;
pub mod settings;
