mod object;
mod record;

pub use object::ObjectRelay;
pub use record::{RecordRelay, Summary};
