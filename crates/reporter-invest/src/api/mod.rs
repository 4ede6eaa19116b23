//! API clients for the external data sources

pub mod brapi;
pub mod google_news;
pub mod investidor10;

pub use brapi::BrapiClient;
pub use google_news::{GoogleNewsClient, Headline, NewsQuery};
pub use investidor10::Investidor10Client;
