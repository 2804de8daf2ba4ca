pub mod generate;
pub mod lookup;

pub use generate::*;
pub use lookup::*;
