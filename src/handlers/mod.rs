pub mod diagnostics;
pub mod health;
pub mod workshops;

pub use diagnostics::*;
pub use health::*;
pub use workshops::*;
