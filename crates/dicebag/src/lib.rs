//! Weighted random dispatch and domain value generators.
//!
//! Build a set of weighted entries, each carrying the parameters for one
//! branch, and let [`Random::generate`] pick a branch with probability
//! proportional to its weight and call an operation with that branch's
//! parameters. Operations are looked up by name in a registry or supplied
//! directly as closures.
//!
//! # Key Features
//!
//! - **Cumulative-weight sampling**: entries own contiguous sub-ranges of
//!   `[1, total]` in order; fractional weights switch to a real-valued draw
//! - **Name or callable dispatch**: built-in generators are registered by
//!   name, and callers can register their own or pass a closure
//! - **Generator library**: integers, floats, money, dates, times,
//!   coordinates, dice, names, Brazilian states and neighborhoods
//! - **Check-digit identifiers**: CNPJ and CPF with modulo-11 check digits
//! - **Injectable randomness**: every draw goes through a [`UniformSource`]
//!
//! # Quick Start
//!
//! ```rust
//! use dicebag::{make_entries, Random};
//! use serde_json::json;
//!
//! let random = Random::new();
//!
//! // 70% a small integer, 30% a large one
//! let entries = make_entries(vec![
//!     (json!(70), json!([1, 10])),
//!     (json!(30), json!([1000, 2000])),
//! ])
//! .unwrap();
//!
//! let value = random.generate("int", &entries).unwrap();
//! assert!(value.is_some());
//! ```
//!
//! # Closures
//!
//! ```rust
//! use dicebag::{make_entries, Random};
//! use serde_json::{json, Value};
//!
//! let random = Random::new();
//! let entries = make_entries(vec![(json!(1), json!("heads")), (json!(1), json!("tails"))]).unwrap();
//!
//! let side = random
//!     .generate_with(|params| Ok(params[0].clone()), &entries)
//!     .unwrap()
//!     .unwrap();
//! assert!(side == Value::from("heads") || side == Value::from("tails"));
//! ```
//!
//! # Identifiers
//!
//! ```rust
//! use dicebag::identifier::Cnpj;
//!
//! let cnpj = Cnpj::from_base(&[1, 2, 3, 4, 5, 6, 7, 8]);
//! assert_eq!(cnpj.to_string(), "12345678000195");
//! assert!(Cnpj::is_valid("12345678000195"));
//! ```

pub mod config;
pub mod error;
pub mod generators;
pub mod identifier;
pub mod locale;
pub mod random;
pub mod registry;
pub mod source;
pub mod weighted;

// Re-export main types for convenience
pub use config::{ConfigError, RandomConfig};
pub use error::{RandomError, Result};
pub use identifier::{Cnpj, Cpf};
pub use locale::{BuiltinLocale, LocaleProvider};
pub use random::{Operation, Random, RandomBuilder};
pub use registry::{OperationFn, OperationRegistry};
pub use source::{FixedSource, RngSource, ThreadRngSource, UniformSource};
pub use weighted::{entries_from_json, make_entries, select, WeightEntry};
