mod driver;

pub use driver::{DatabaseDriver, PreparedStatement};
