pub mod record;
pub mod release_date;
pub mod window;

pub use record::*;
pub use release_date::*;
pub use window::*;
