pub mod bar;
pub mod indicator;
pub mod recommendation;

pub use bar::*;
pub use indicator::*;
pub use recommendation::*;
