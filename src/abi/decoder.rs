//! Receipt event decoding
//!
//! Locates the log emitted for a named event in a transaction receipt and
//! decodes its arguments. Two flavours are provided:
//!
//! - [`decode_event`] works against a runtime [`JsonAbi`] and returns a
//!   [`DecodedEvent`] keyed by parameter name.
//! - [`decode_typed`] / [`decode_all_typed`] work against a `sol!`-generated
//!   [`SolEvent`] and return the event struct itself.
//!
//! Matching is "first log wins": logs are scanned in receipt order and the
//! first one carrying the event's identifying topic is decoded.

use crate::error::{AbiError, Result};
use alloy::dyn_abi::{DynSolValue, EventExt};
use alloy::json_abi::{Event, JsonAbi};
use alloy::rpc::types::{Log, TransactionReceipt};
use alloy::sol_types::SolEvent;
use serde_json::{json, Value};

/// Anything that exposes an ordered list of emitted logs
pub trait LogSource {
    /// Logs in emission order
    fn logs(&self) -> &[Log];
}

impl LogSource for [Log] {
    fn logs(&self) -> &[Log] {
        self
    }
}

impl LogSource for Vec<Log> {
    fn logs(&self) -> &[Log] {
        self
    }
}

impl LogSource for TransactionReceipt {
    fn logs(&self) -> &[Log] {
        self.inner.logs()
    }
}

/// An event decoded against a runtime ABI
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEvent {
    /// Event name
    pub name: String,
    /// Parameters in declaration order
    pub fields: Vec<(String, DynSolValue)>,
}

impl DecodedEvent {
    /// Look up a parameter by name
    pub fn get(&self, name: &str) -> Option<&DynSolValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Parameter names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// JSON object `{ "event": name, "args": { param: value, ... } }`
    pub fn to_json(&self) -> Value {
        let args: serde_json::Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), value_to_json(value)))
            .collect();

        json!({
            "event": self.name,
            "args": args,
        })
    }
}

/// Decode the first log matching `event_name` from `source`.
///
/// Fails with [`AbiError::UnknownEvent`] when the ABI does not declare the
/// event, [`AbiError::EventNotInReceipt`] when no log matches, and
/// [`AbiError::DecodeError`] when the matched log does not fit the declared
/// parameter types. Overloaded events sharing the name are all candidates.
pub fn decode_event<S>(abi: &JsonAbi, source: &S, event_name: &str) -> Result<DecodedEvent>
where
    S: LogSource + ?Sized,
{
    let candidates = abi
        .event(event_name)
        .filter(|events| !events.is_empty())
        .ok_or_else(|| AbiError::UnknownEvent(event_name.to_string()))?;

    for log in source.logs() {
        for event in candidates {
            if let Some(decoded) = match_log(event, log)? {
                return Ok(decoded);
            }
        }
    }

    Err(AbiError::EventNotInReceipt(event_name.to_string()).into())
}

/// Try to match a single log against an event definition
fn match_log(event: &Event, log: &Log) -> Result<Option<DecodedEvent>> {
    let topics = log.topics();

    if event.anonymous {
        // No identifying topic: shape and a clean decode are all we have
        let indexed = event.inputs.iter().filter(|p| p.indexed).count();
        if topics.len() != indexed {
            return Ok(None);
        }
        return Ok(decode_log(event, log).ok());
    }

    if topics.first() != Some(&event.selector()) {
        return Ok(None);
    }

    decode_log(event, log).map(Some)
}

/// Decode a log known to belong to `event`
fn decode_log(event: &Event, log: &Log) -> Result<DecodedEvent> {
    let decoded = event
        .decode_log_parts(log.topics().iter().copied(), &log.data().data)
        .map_err(|e| AbiError::DecodeError(format!("{}: {}", event.name, e)))?;

    let mut indexed = decoded.indexed.into_iter();
    let mut body = decoded.body.into_iter();
    let mut fields = Vec::with_capacity(event.inputs.len());

    for (i, param) in event.inputs.iter().enumerate() {
        let value = if param.indexed {
            indexed.next()
        } else {
            body.next()
        }
        .ok_or_else(|| {
            AbiError::DecodeError(format!("{}: missing value for parameter {}", event.name, i))
        })?;

        let name = if param.name.is_empty() {
            format!("arg{}", i)
        } else {
            param.name.clone()
        };
        fields.push((name, value));
    }

    Ok(DecodedEvent {
        name: event.name.clone(),
        fields,
    })
}

/// Decode the first log emitting `E`
pub fn decode_typed<E, S>(source: &S) -> Result<E>
where
    E: SolEvent,
    S: LogSource + ?Sized,
{
    if E::ANONYMOUS {
        return source
            .logs()
            .iter()
            .find_map(|log| E::decode_log_data(log.data()).ok())
            .ok_or_else(|| AbiError::EventNotInReceipt(E::SIGNATURE.to_string()).into());
    }

    let log = source
        .logs()
        .iter()
        .find(|log| log.topics().first() == Some(&E::SIGNATURE_HASH))
        .ok_or_else(|| AbiError::EventNotInReceipt(E::SIGNATURE.to_string()))?;

    decode_typed_log(log)
}

/// Decode every log emitting `E`, in receipt order
///
/// Returns an empty vector when nothing matches; batch callers decide
/// whether that is an error.
pub fn decode_all_typed<E, S>(source: &S) -> Result<Vec<E>>
where
    E: SolEvent,
    S: LogSource + ?Sized,
{
    source
        .logs()
        .iter()
        .filter(|log| log.topics().first() == Some(&E::SIGNATURE_HASH))
        .map(decode_typed_log::<E>)
        .collect()
}

fn decode_typed_log<E: SolEvent>(log: &Log) -> Result<E> {
    E::decode_log_data(log.data())
        .map_err(|e| AbiError::DecodeError(format!("{}: {}", E::SIGNATURE, e)).into())
}

/// Format a DynSolValue for display
#[allow(unreachable_patterns)]
pub fn format_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::FixedBytes(b, size) => format!("0x{}", hex::encode(&b[..*size])),
        DynSolValue::Address(a) => a.to_checksum(None),
        DynSolValue::Function(f) => format!("0x{}", hex::encode(f)),
        DynSolValue::Bytes(b) => format!("0x{}", hex::encode(b)),
        DynSolValue::String(s) => format!("\"{}\"", s),
        DynSolValue::Array(arr) | DynSolValue::FixedArray(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            format!("[{}]", items.join(", "))
        }
        DynSolValue::Tuple(tuple) => {
            let items: Vec<String> = tuple.iter().map(format_value).collect();
            format!("({})", items.join(", "))
        }
        other => format!("{:?}", other),
    }
}

/// Convert a DynSolValue to JSON. Integers become decimal strings so large
/// values survive the round trip.
#[allow(unreachable_patterns)]
pub fn value_to_json(value: &DynSolValue) -> Value {
    match value {
        DynSolValue::Bool(b) => Value::Bool(*b),
        DynSolValue::Int(i, _) => Value::String(i.to_string()),
        DynSolValue::Uint(u, _) => Value::String(u.to_string()),
        DynSolValue::String(s) => Value::String(s.clone()),
        DynSolValue::Array(arr) | DynSolValue::FixedArray(arr) | DynSolValue::Tuple(arr) => {
            Value::Array(arr.iter().map(value_to_json).collect())
        }
        DynSolValue::FixedBytes(..)
        | DynSolValue::Address(_)
        | DynSolValue::Function(_)
        | DynSolValue::Bytes(_) => Value::String(format_value(value)),
        other => Value::String(format!("{:?}", other)),
    }
}
