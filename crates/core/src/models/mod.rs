pub mod chart;
pub mod forecast;
pub mod market;
pub mod news;
pub mod settings;
pub mod social;
