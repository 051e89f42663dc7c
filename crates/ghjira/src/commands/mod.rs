//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod convert;
pub(crate) mod keys;

pub(crate) use check::CheckArgs;
pub(crate) use convert::ConvertArgs;
pub(crate) use keys::KeysArgs;
