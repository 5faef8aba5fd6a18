pub(crate) mod defaults;
pub(crate) mod expand;
pub(crate) mod model;
