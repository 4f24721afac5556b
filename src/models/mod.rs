pub mod signal;
pub mod response;

pub use signal::*;
pub use response::*;
