pub mod accessor;
pub mod record;
