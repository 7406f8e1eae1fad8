//! Capacity check for distributed sequences.
//!
//! A distributed sequence hands out chunks of values to each router. The
//! chunk size is derived from the sequence range and capped at
//! `max_chunk`; the sequence is rejected when its range is too small to
//! split, when its cache exceeds a chunk, or when the first chunk boundary
//! falls outside the range of its data type.

use limitless_sql_core::{Node, NodeKind};
use serde::Deserialize;

use crate::error::RuleFault;

/// Router layout assumed by the capacity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SequenceLimits {
    /// Number of routers sharing the sequence.
    pub routers: i64,
    /// Largest chunk handed to a router.
    pub max_chunk: i64,
    /// Smallest sequence range that can be distributed.
    pub min_size: i64,
}

impl Default for SequenceLimits {
    fn default() -> Self {
        Self {
            routers: 2,
            max_chunk: 250_000,
            min_size: 16,
        }
    }
}

#[derive(Debug, Default)]
struct Options {
    data_type: Option<String>,
    increment: Option<i128>,
    min: Option<i128>,
    max: Option<i128>,
    start: Option<i128>,
    cache: Option<i128>,
}

impl Options {
    fn collect(node: &Node) -> Result<Self, RuleFault> {
        let mut options = Self::default();
        for option in node.children_of(NodeKind::SequenceOption) {
            let name = option.value().unwrap_or_default();
            match name {
                "AS" => {
                    options.data_type = option
                        .child(NodeKind::DataType)
                        .and_then(Node::value)
                        .map(str::to_string);
                }
                "INCREMENT" => options.increment = Some(argument(option, name)?),
                "MINVALUE" => options.min = Some(argument(option, name)?),
                "MAXVALUE" => options.max = Some(argument(option, name)?),
                "START" => options.start = Some(argument(option, name)?),
                "CACHE" => options.cache = Some(argument(option, name)?),
                _ => {}
            }
        }
        Ok(options)
    }
}

fn argument(option: &Node, name: &str) -> Result<i128, RuleFault> {
    let text = option
        .child(NodeKind::Literal)
        .and_then(Node::value)
        .ok_or_else(|| RuleFault::MissingArgument(name.to_string()))?;
    text.parse().map_err(|_| RuleFault::InvalidNumber {
        option: name.to_string(),
        value: text.to_string(),
    })
}

/// Returns the value range of a sequence data type.
fn type_range(data_type: &str) -> (i128, i128) {
    match data_type {
        "smallint" | "int2" => (i16::MIN.into(), i16::MAX.into()),
        "int" | "integer" | "int4" => (i32::MIN.into(), i32::MAX.into()),
        _ => (i64::MIN.into(), i64::MAX.into()),
    }
}

/// Checks a `create_sequence` node and returns the reason it cannot be
/// distributed, if any.
///
/// Unspecified bounds follow PostgreSQL: ascending sequences run from 1 to
/// the type maximum, descending ones from -1 down to the type minimum, and
/// start at the bound they move away from.
///
/// # Errors
///
/// Returns a `RuleFault` if the node is not a sequence definition, an option
/// argument is not an integer, or the limits are not positive.
pub fn check_capacity(node: &Node, limits: &SequenceLimits) -> Result<Option<String>, RuleFault> {
    if node.kind != NodeKind::CreateSequence {
        return Err(RuleFault::WrongTarget {
            expected: NodeKind::CreateSequence,
            found: node.kind,
        });
    }
    if limits.routers <= 0 || limits.max_chunk <= 0 {
        return Err(RuleFault::InvalidCheck(
            "routers and max_chunk must be positive".to_string(),
        ));
    }

    let options = Options::collect(node)?;
    let data_type = options.data_type.as_deref().unwrap_or("bigint");
    let (type_min, type_max) = type_range(data_type);
    let routers = i128::from(limits.routers);

    let increment = options.increment.unwrap_or(1);
    if increment == 0 {
        return Ok(Some("INCREMENT must not be zero".to_string()));
    }
    let ascending = increment > 0;
    let min = options.min.unwrap_or(if ascending { 1 } else { type_min });
    let max = options.max.unwrap_or(if ascending { type_max } else { -1 });
    let start = options.start.unwrap_or(if ascending { min } else { max });
    let size = if ascending {
        max - start + 1
    } else {
        start - min + 1
    }
    .max(0);

    let chunk = (size / (2 * routers) / 2).min(i128::from(limits.max_chunk));
    let boundary = increment * chunk;

    let problem = if size < i128::from(limits.min_size) {
        Some(format!(
            "Not enough values to create distributed sequence. The sequence must hold more \
             than 2 * chunk_size * increment * routers values \
             (chunk_size={chunk}, increment={increment}, routers={routers})"
        ))
    } else if options.cache.unwrap_or(1) > chunk {
        Some(format!(
            "CACHE parameter must be less than chunk size: {chunk}"
        ))
    } else if !ascending && boundary < type_min {
        Some(format!(
            "MINVALUE ({boundary}) is out of range for sequence data type {data_type}"
        ))
    } else if ascending && boundary > type_max {
        Some(format!(
            "MAXVALUE ({boundary}) is out of range for sequence data type {data_type}"
        ))
    } else {
        None
    };
    Ok(problem)
}
