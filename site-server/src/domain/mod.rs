pub(crate) mod blog;
pub(crate) mod error;
pub(crate) mod message;
pub(crate) mod pagination;
pub(crate) mod user;
