pub mod accounts;
pub mod journals;
pub mod trades;

pub use accounts::*;
pub use journals::*;
pub use trades::*;
