pub mod bar_source;
pub mod signals;
pub mod tools;

pub use bar_source::{normalize_ticker, BarSource, JsonFileSource, MemorySource};
pub use signals::Analyzer;
pub use tools::{invoke_tool, tool_definitions};
