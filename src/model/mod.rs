pub(crate) mod types;
pub(crate) mod value;
