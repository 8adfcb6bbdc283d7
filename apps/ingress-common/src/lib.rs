pub mod perimeter;
pub mod reqid;
pub mod respond;
pub mod telemetry;

pub use perimeter::*;
pub use reqid::*;
pub use respond::*;
pub use telemetry::*;
