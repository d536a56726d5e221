#[allow(clippy::module_inception)]
pub(crate) mod actor;
pub(crate) mod control_actor;
