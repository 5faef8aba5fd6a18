pub(crate) mod assembler;
pub(crate) mod backend;
pub(crate) mod cpu;
pub(crate) mod fingerprint;
pub(crate) mod layout;
pub(crate) mod pipeline;
pub(crate) mod segment;
