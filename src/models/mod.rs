pub mod diagnostics;
pub mod error;
pub mod health;
pub mod identity;
pub mod messages;
pub mod transform;
pub mod workshop;

pub use diagnostics::*;
pub use error::*;
pub use health::*;
pub use identity::*;
pub use messages::*;
pub use transform::*;
pub use workshop::*;
