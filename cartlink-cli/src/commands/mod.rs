pub(crate) mod dump;
pub(crate) mod flash;
pub(crate) mod info;
