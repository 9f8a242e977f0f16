pub mod aligner;
pub mod chart_service;
pub mod currency_service;
pub mod market_service;
pub mod portfolio_service;
