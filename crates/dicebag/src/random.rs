//! The dispatcher: samples a weighted entry and invokes an operation with its parameters.

use crate::config::RandomConfig;
use crate::error::{RandomError, Result};
use crate::locale::{BuiltinLocale, LocaleProvider};
use crate::registry::{OperationFn, OperationRegistry};
use crate::source::{ThreadRngSource, UniformSource};
use crate::weighted::{select, WeightEntry};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// The operation invoked with the winning entry's parameters.
#[derive(Clone, Copy)]
pub enum Operation<'a> {
    /// A registered operation, looked up by name.
    Named(&'a str),
    /// A caller-supplied function.
    Callable(&'a dyn Fn(&[Value]) -> Result<Value>),
}

impl<'a> From<&'a str> for Operation<'a> {
    fn from(name: &'a str) -> Self {
        Operation::Named(name)
    }
}

impl<'a> From<&'a String> for Operation<'a> {
    fn from(name: &'a String) -> Self {
        Operation::Named(name.as_str())
    }
}

impl std::fmt::Debug for Operation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Operation::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

enum Resolved<'a> {
    Registered(OperationFn),
    Callable(&'a dyn Fn(&[Value]) -> Result<Value>),
}

/// Weighted dispatcher and generator library.
///
/// Holds no mutable state of its own: every call draws from the injected
/// [`UniformSource`], so a `Random` can be shared across threads.
///
/// # Example
/// ```
/// use dicebag::{make_entries, Random};
/// use serde_json::json;
///
/// let random = Random::new();
/// let entries = make_entries(vec![(json!(70), json!([1, 10])), (json!(30), json!([50, 60]))]).unwrap();
///
/// let value = random.generate("int", &entries).unwrap().unwrap();
/// let n = value.as_i64().unwrap();
/// assert!((1..=10).contains(&n) || (50..=60).contains(&n));
/// ```
#[derive(Clone)]
pub struct Random {
    pub(crate) source: Arc<dyn UniformSource>,
    pub(crate) locale: Arc<dyn LocaleProvider>,
    pub(crate) registry: OperationRegistry,
    pub(crate) config: RandomConfig,
}

impl Random {
    /// A dispatcher with the thread-local RNG, built-in locale data and every built-in operation.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> RandomBuilder {
        RandomBuilder::new()
    }

    pub fn source(&self) -> &dyn UniformSource {
        self.source.as_ref()
    }

    pub fn config(&self) -> &RandomConfig {
        &self.config
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Sample one entry and invoke `operation` with its parameters.
    ///
    /// The operation is resolved before sampling, so an unknown name fails
    /// without drawing. Returns `Ok(None)` if sampling lands on no entry.
    pub fn generate<'a>(
        &self,
        operation: impl Into<Operation<'a>>,
        entries: &[WeightEntry],
    ) -> Result<Option<Value>> {
        let resolved = match operation.into() {
            Operation::Named(name) => Resolved::Registered(
                self.registry
                    .get(name)
                    .ok_or_else(|| RandomError::unknown_operation(name))?,
            ),
            Operation::Callable(f) => Resolved::Callable(f),
        };

        let Some((index, entry)) = select(self.source.as_ref(), entries)? else {
            debug!(entries = entries.len(), "no entry selected");
            return Ok(None);
        };
        debug!(index, weight = entry.weight(), "entry selected");

        let value = match resolved {
            Resolved::Registered(f) => f(self, entry.parameters())?,
            Resolved::Callable(f) => f(entry.parameters())?,
        };
        Ok(Some(value))
    }

    /// Like [`generate`](Self::generate) with a closure as the operation.
    pub fn generate_with<F>(&self, f: F, entries: &[WeightEntry]) -> Result<Option<Value>>
    where
        F: Fn(&[Value]) -> Result<Value>,
    {
        self.generate(Operation::Callable(&f), entries)
    }

    /// Invoke a registered operation directly with positional parameters.
    pub fn invoke(&self, name: &str, params: &[Value]) -> Result<Value> {
        let f = self
            .registry
            .get(name)
            .ok_or_else(|| RandomError::unknown_operation(name))?;
        f(self, params)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Random {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Random")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Fluent builder for [`Random`].
///
/// # Example
/// ```
/// use dicebag::Random;
/// use dicebag::source::FixedSource;
///
/// let random = Random::builder()
///     .source(FixedSource::constant(4))
///     .locale("en_US")
///     .build();
///
/// assert_eq!(random.int(1, 6).unwrap(), 4);
/// ```
pub struct RandomBuilder {
    source: Arc<dyn UniformSource>,
    locale: Arc<dyn LocaleProvider>,
    registry: OperationRegistry,
    config: RandomConfig,
}

impl RandomBuilder {
    /// Start from the thread-local RNG, built-in locale data and the built-in operations.
    pub fn new() -> Self {
        Self {
            source: Arc::new(ThreadRngSource::new()),
            locale: Arc::new(BuiltinLocale::new()),
            registry: OperationRegistry::builtin(),
            config: RandomConfig::default(),
        }
    }

    /// Set the uniform source used for every draw.
    pub fn source(mut self, source: impl UniformSource + 'static) -> Self {
        self.source = Arc::new(source);
        self
    }

    /// Set a shared uniform source.
    pub fn shared_source(mut self, source: Arc<dyn UniformSource>) -> Self {
        self.source = source;
        self
    }

    /// Set the fake-data provider.
    pub fn locale_provider(mut self, provider: impl LocaleProvider + 'static) -> Self {
        self.locale = Arc::new(provider);
        self
    }

    /// Set the default locale.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.config.locale = locale.into();
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: RandomConfig) -> Self {
        self.config = config;
        self
    }

    /// Register an extra operation, replacing any built-in with the same name.
    pub fn register(mut self, name: impl Into<String>, operation: OperationFn) -> Self {
        self.registry.register(name, operation);
        self
    }

    /// Replace the registry entirely.
    pub fn registry(mut self, registry: OperationRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn build(self) -> Random {
        Random {
            source: self.source,
            locale: self.locale,
            registry: self.registry,
            config: self.config,
        }
    }
}

impl Default for RandomBuilder {
    fn default() -> Self {
        Self::new()
    }
}
