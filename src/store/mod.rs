pub mod csv;
pub mod memory;
pub mod traits;

pub use self::csv::*;
pub use self::memory::*;
pub use self::traits::*;
