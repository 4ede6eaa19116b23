//! LLM tools for the report agents

pub mod fundamentals;
pub mod news;

pub use fundamentals::StockFundamentalsTool;
pub use news::NewsSearchTool;
