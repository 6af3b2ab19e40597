//! Name-to-operation registry used by weighted dispatch.
//!
//! Operations are plain function pointers that receive the dispatcher as
//! context, so an operation can itself dispatch (see `jan_ken_pon`) without
//! capturing any outer state.

use crate::config::{parse_clock, parse_date};
use crate::error::{RandomError, Result};
use crate::generators::echo;
use crate::random::Random;
use crate::weighted::entries_from_json;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::trace;

/// A registered operation: positional JSON parameters in, JSON value out.
pub type OperationFn = fn(&Random, &[Value]) -> Result<Value>;

/// Mapping from operation name to function.
#[derive(Clone, Default)]
pub struct OperationRegistry {
    operations: BTreeMap<String, OperationFn>,
}

impl OperationRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in generator.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("echo", op_echo);
        registry.register("boolean", op_boolean);
        registry.register("unique_code", op_unique_code);
        registry.register("code", op_code);
        registry.register("int", op_int);
        registry.register("date", op_date);
        registry.register("time", op_time);
        registry.register("float", op_float);
        registry.register("money", op_money);
        registry.register("jan_ken_pon", op_jan_ken_pon);
        registry.register("dice", op_dice);
        registry.register("lat_long", op_lat_long);
        registry.register("name", op_name);
        registry.register("cpf", op_cpf);
        registry.register("cnpj", op_cnpj);
        registry.register("cep", op_cep);
        registry.register("uf", op_uf);
        registry.register("bairro", op_bairro);
        registry
    }

    /// Register an operation, returning the one it replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        operation: OperationFn,
    ) -> Option<OperationFn> {
        self.operations.insert(name.into(), operation)
    }

    pub fn get(&self, name: &str) -> Option<OperationFn> {
        let found = self.operations.get(name).copied();
        trace!(name, found = found.is_some(), "operation lookup");
        found
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl std::fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

// ----------------------------------------------------------------------------
// Positional parameters
// ----------------------------------------------------------------------------

/// Positional parameters of one operation call. `null` counts as absent.
struct Args<'a> {
    op: &'static str,
    params: &'a [Value],
}

impl<'a> Args<'a> {
    fn new(op: &'static str, params: &'a [Value]) -> Self {
        Self { op, params }
    }

    fn get(&self, index: usize) -> Option<&'a Value> {
        self.params.get(index).filter(|v| !v.is_null())
    }

    fn invalid(&self, name: &str, expected: &str, value: &Value) -> RandomError {
        RandomError::invalid_argument(format!(
            "{}: parameter '{}' must be {}, got '{}'",
            self.op, name, expected, value
        ))
    }

    fn required(&self, index: usize, name: &str) -> Result<&'a Value> {
        self.get(index).ok_or_else(|| {
            RandomError::invalid_argument(format!("{}: missing parameter '{}'", self.op, name))
        })
    }

    fn f64_opt(&self, index: usize, name: &str) -> Result<Option<f64>> {
        self.get(index)
            .map(|v| as_f64(v).ok_or_else(|| self.invalid(name, "a number", v)))
            .transpose()
    }

    fn f64(&self, index: usize, name: &str) -> Result<f64> {
        let value = self.required(index, name)?;
        as_f64(value).ok_or_else(|| self.invalid(name, "a number", value))
    }

    fn i64_or(&self, index: usize, name: &str, default: i64) -> Result<i64> {
        match self.get(index) {
            Some(v) => as_i64(v).ok_or_else(|| self.invalid(name, "an integer", v)),
            None => Ok(default),
        }
    }

    fn i64(&self, index: usize, name: &str) -> Result<i64> {
        let value = self.required(index, name)?;
        as_i64(value).ok_or_else(|| self.invalid(name, "an integer", value))
    }

    fn u32_or(&self, index: usize, name: &str, default: u32) -> Result<u32> {
        let value = self.i64_or(index, name, i64::from(default))?;
        u32::try_from(value)
            .map_err(|_| self.invalid(name, "a non-negative integer", &Value::from(value)))
    }

    fn str_opt(&self, index: usize, name: &str) -> Result<Option<&'a str>> {
        self.get(index)
            .map(|v| v.as_str().ok_or_else(|| self.invalid(name, "a string", v)))
            .transpose()
    }
}

/// Numbers, and strings holding a number.
fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Integers, whole floats, and strings holding an integer.
fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 9.2e18)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ----------------------------------------------------------------------------
// Built-in operations
// ----------------------------------------------------------------------------

fn op_echo(_: &Random, params: &[Value]) -> Result<Value> {
    echo(params)
}

fn op_boolean(random: &Random, params: &[Value]) -> Result<Value> {
    let args = Args::new("boolean", params);
    Ok(Value::Bool(random.boolean(args.i64_or(0, "chance_to_true", 50)?)))
}

fn op_unique_code(random: &Random, _: &[Value]) -> Result<Value> {
    Ok(Value::String(random.unique_code()))
}

fn op_code(random: &Random, params: &[Value]) -> Result<Value> {
    let args = Args::new("code", params);
    Ok(Value::from(random.code(args.u32_or(0, "length", 1)?)?))
}

fn op_int(random: &Random, params: &[Value]) -> Result<Value> {
    let args = Args::new("int", params);
    Ok(Value::from(random.int(args.i64(0, "min")?, args.i64(1, "max")?)?))
}

fn op_date(random: &Random, params: &[Value]) -> Result<Value> {
    let args = Args::new("date", params);
    let parse = |index: usize, name: &'static str| -> Result<_> {
        args.str_opt(index, name)?
            .map(|s| {
                parse_date(s)
                    .ok_or_else(|| args.invalid(name, "a YYYY-MM-DD date", &params[index]))
            })
            .transpose()
    };
    let date = random.date(parse(0, "start")?, parse(1, "end")?)?;
    Ok(Value::String(date.format("%Y-%m-%d").to_string()))
}

fn op_time(random: &Random, params: &[Value]) -> Result<Value> {
    let args = Args::new("time", params);
    let parse = |index: usize, name: &'static str, end_of_minute: bool| -> Result<_> {
        args.str_opt(index, name)?
            .map(|s| {
                parse_clock(s, end_of_minute)
                    .ok_or_else(|| args.invalid(name, "an HH:MM time", &params[index]))
            })
            .transpose()
    };
    let time = random.time(parse(0, "start", false)?, parse(1, "end", true)?)?;
    Ok(Value::String(time.format("%H:%M:%S").to_string()))
}

fn op_float(random: &Random, params: &[Value]) -> Result<Value> {
    let args = Args::new("float", params);
    let value = random.float(
        args.f64(0, "min")?,
        args.f64(1, "max")?,
        args.u32_or(2, "precision", 2)?,
    )?;
    Ok(Value::from(value))
}

fn op_money(random: &Random, params: &[Value]) -> Result<Value> {
    let args = Args::new("money", params);
    let value = random.money(
        args.f64(0, "min")?,
        args.f64(1, "max")?,
        args.f64_opt(2, "multiple_of")?,
    )?;
    Ok(Value::from(value))
}

fn op_jan_ken_pon(random: &Random, params: &[Value]) -> Result<Value> {
    let args = Args::new("jan_ken_pon", params);
    let entries = entries_from_json(args.required(0, "pairs")?)?;
    Ok(random.jan_ken_pon(&entries)?.unwrap_or(Value::Null))
}

fn op_dice(random: &Random, params: &[Value]) -> Result<Value> {
    let args = Args::new("dice", params);
    let faces: Vec<Value> = match args.get(0) {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::Object(map)) => map.values().cloned().collect(),
        Some(other) => return Err(args.invalid("values", "an array or object", other)),
        None => Vec::new(),
    };
    Ok(random.dice(&faces).unwrap_or(Value::Bool(false)))
}

fn op_lat_long(random: &Random, params: &[Value]) -> Result<Value> {
    let args = Args::new("lat_long", params);
    let value = random.lat_long(args.i64_or(0, "min", -180)?, args.i64_or(1, "max", 180)?)?;
    Ok(Value::from(value))
}

fn op_name(random: &Random, params: &[Value]) -> Result<Value> {
    let args = Args::new("name", params);
    Ok(Value::String(random.name(args.str_opt(0, "locale")?)))
}

fn op_cpf(random: &Random, _: &[Value]) -> Result<Value> {
    Ok(Value::String(random.cpf()))
}

fn op_cnpj(random: &Random, _: &[Value]) -> Result<Value> {
    Ok(Value::String(random.cnpj()))
}

fn op_cep(random: &Random, _: &[Value]) -> Result<Value> {
    Ok(Value::String(random.cep()))
}

fn op_uf(random: &Random, _: &[Value]) -> Result<Value> {
    Ok(Value::from(random.uf()))
}

fn op_bairro(random: &Random, _: &[Value]) -> Result<Value> {
    Ok(Value::from(random.bairro()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::Cnpj;
    use crate::source::FixedSource;
    use crate::weighted::make_entries;
    use serde_json::json;

    fn scripted(values: Vec<i64>) -> Random {
        Random::builder().source(FixedSource::new(values)).build()
    }

    #[test]
    fn test_builtin_names() {
        let registry = OperationRegistry::builtin();
        for name in [
            "echo", "boolean", "unique_code", "code", "int", "date", "time", "float", "money",
            "jan_ken_pon", "dice", "lat_long", "name", "cpf", "cnpj", "cep", "uf", "bairro",
        ] {
            assert!(registry.contains(name), "missing builtin {}", name);
        }
        assert_eq!(registry.len(), 18);
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = OperationRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.register("x", op_echo).is_none());
        assert!(registry.register("x", op_cnpj).is_some());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn test_int_requires_bounds() {
        let random = Random::new();
        let err = random.invoke("int", &[json!(1)]).unwrap_err();
        match err {
            RandomError::InvalidArgument { message } => assert!(message.contains("max")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let random = scripted(vec![3]);
        assert_eq!(random.invoke("int", &[json!("1"), json!("5")]).unwrap(), json!(3));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let random = Random::new();
        assert!(random.invoke("int", &[json!("one"), json!(5)]).is_err());
        assert!(random.invoke("name", &[json!(5)]).is_err());
        assert!(random.invoke("dice", &[json!(5)]).is_err());
    }

    #[test]
    fn test_boolean_default_chance() {
        let random = scripted(vec![50, 51]);
        assert_eq!(random.invoke("boolean", &[]).unwrap(), json!(true));
        assert_eq!(random.invoke("boolean", &[Value::Null]).unwrap(), json!(false));
    }

    #[test]
    fn test_date_and_time_formats() {
        let random = scripted(vec![0]);
        assert_eq!(
            random.invoke("date", &[json!("2024-05-01"), json!("2024-05-31")]).unwrap(),
            json!("2024-05-01")
        );
        assert_eq!(
            random.invoke("time", &[json!("10:15"), json!("11:00")]).unwrap(),
            json!("10:15:00")
        );
        assert!(random.invoke("date", &[json!("May 1")]).is_err());
    }

    #[test]
    fn test_money_and_float() {
        let random = scripted(vec![250]);
        assert_eq!(random.invoke("float", &[json!(1), json!(5)]).unwrap(), json!(2.5));
        assert_eq!(
            random.invoke("money", &[json!(0), json!(1000), json!(100)]).unwrap(),
            json!(300.0)
        );
    }

    #[test]
    fn test_dice_empty_is_false() {
        let random = Random::new();
        assert_eq!(random.invoke("dice", &[json!([])]).unwrap(), json!(false));
        assert_eq!(random.invoke("dice", &[]).unwrap(), json!(false));
    }

    #[test]
    fn test_dice_object_values() {
        let random = scripted(vec![0]);
        let value = random.invoke("dice", &[json!({"a": "first"})]).unwrap();
        assert_eq!(value, json!("first"));
    }

    #[test]
    fn test_nested_jan_ken_pon_dispatch() {
        // outer draw is clamped onto the single entry, inner draw picks "paper"
        let random = scripted(vec![2]);
        let pairs = json!([[1, "rock"], [1, "paper"], [1, "scissors"]]);
        let entries = make_entries(vec![(json!(1), json!([pairs]))]).unwrap();
        let value = random.generate("jan_ken_pon", &entries).unwrap();
        assert_eq!(value, Some(json!("paper")));
    }

    #[test]
    fn test_jan_ken_pon_rejects_loose_values() {
        let random = Random::new();
        let err = random.invoke("jan_ken_pon", &[json!(["rock", "paper"])]).unwrap_err();
        assert!(matches!(err, RandomError::InvalidArgument { .. }));
    }

    #[test]
    fn test_cnpj_operation() {
        let random = Random::new();
        let value = random.invoke("cnpj", &[]).unwrap();
        assert!(Cnpj::is_valid(value.as_str().unwrap()));
    }

    #[test]
    fn test_lat_long_defaults() {
        let random = Random::new();
        let value = random.invoke("lat_long", &[]).unwrap().as_f64().unwrap();
        assert!((-180.0..=180.0).contains(&value));
    }
}
