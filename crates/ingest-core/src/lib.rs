pub mod batch;
pub mod error;
pub mod identity;
pub mod scoring;
pub mod symbol;
pub mod traits;
pub mod types;

pub use batch::*;
pub use error::*;
pub use identity::*;
pub use scoring::*;
pub use symbol::*;
pub use traits::*;
pub use types::*;
