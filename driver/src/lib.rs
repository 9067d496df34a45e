use std::str::FromStr;

use error_stack::{Report, ResultExt};
use kernel::KernelError;

pub mod clock;
pub mod database;
pub mod error;
pub mod handler;
pub mod logging;

pub(crate) fn env(key: &str) -> error_stack::Result<String, KernelError> {
    dotenvy::var(key)
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Env {} not specified", key))
}

/// Reads and parses `key`, falling back to `default` when it is unset.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> error_stack::Result<T, KernelError> {
    match dotenvy::var(key) {
        Ok(value) => value.parse::<T>().map_err(|_| {
            Report::new(KernelError::Internal)
                .attach_printable(format!("Env {} has an invalid value: {}", key, value))
        }),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(default),
        Err(error) => Err(Report::new(error)
            .change_context(KernelError::Internal)
            .attach_printable(format!("Env {} could not be read", key))),
    }
}
