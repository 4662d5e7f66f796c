pub mod price;
pub mod results;
pub mod signals;
pub mod status;
pub mod symbol;

pub use price::*;
pub use results::*;
pub use signals::*;
pub use status::*;
pub use symbol::*;
