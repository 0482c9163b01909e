pub mod chart_service;
pub mod forecast_service;
pub mod market_service;
pub mod news_service;
pub mod sentiment_service;
