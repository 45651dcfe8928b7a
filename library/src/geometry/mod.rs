pub mod alias;
pub(crate) mod epsilon;
