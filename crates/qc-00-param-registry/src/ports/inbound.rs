//! Inbound ports (driving API) for the Parameter Registry.

use crate::domain::entities::{ParamSchema, ParamValue};
use crate::domain::errors::RegistryError;

/// Primary Parameter Registry API.
///
/// Reads are lock-free snapshot lookups; `set`/`register_schema` take a
/// serial mutex and publish a new snapshot atomically on success.
pub trait ParameterRegistryApi: Send + Sync {
    /// Returns the current value of `name`, or `UnknownParameter`.
    fn get(&self, name: &str) -> Result<ParamValue, RegistryError>;

    /// Validates `value` against the registered schema and publishes it.
    fn set(&self, name: &str, value: ParamValue) -> Result<(), RegistryError>;

    /// Installs a validator for a new parameter, seeding it with `initial`.
    fn register_schema(
        &self,
        name: &str,
        schema: ParamSchema,
        initial: ParamValue,
    ) -> Result<(), RegistryError>;
}
