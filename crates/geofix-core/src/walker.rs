//! Coordinate tree traversal.
//!
//! Walks arbitrarily nested JSON mappings and sequences and finds coordinate
//! pairs without knowing the enclosing geometry type. A node is a pair iff it
//! is a sequence of exactly two numbers. Positions carrying a third
//! (elevation) component are therefore not pairs: they are left as they are,
//! and their numeric children are plain scalars.

use serde_json::{Map, Number, Value};

/// Typed view of one node in a coordinate tree
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Pair(Pair<'a>),
    Sequence(&'a [Value]),
    Mapping(&'a Map<String, Value>),
    Scalar(&'a Value),
}

/// A two-number leaf, borrowed from the tree
#[derive(Debug, Clone, Copy)]
pub struct Pair<'a> {
    pub first: &'a Number,
    pub second: &'a Number,
}

impl<'a> Pair<'a> {
    /// Both components as `f64`, `None` if a number does not fit
    pub fn as_f64(&self) -> Option<[f64; 2]> {
        Some([self.first.as_f64()?, self.second.as_f64()?])
    }

    /// The pair with its components swapped, keeping the original number representation
    pub fn swapped(&self) -> Value {
        Value::Array(vec![Value::Number(self.second.clone()), Value::Number(self.first.clone())])
    }
}

/// Classify a node
pub fn classify(value: &Value) -> Node<'_> {
    match value {
        Value::Array(items) => match items.as_slice() {
            [Value::Number(first), Value::Number(second)] => Node::Pair(Pair { first, second }),
            _ => Node::Sequence(items),
        },
        Value::Object(map) => Node::Mapping(map),
        other => Node::Scalar(other),
    }
}

/// Return a structurally identical tree with every pair replaced by `transform(pair)`.
pub fn map_pairs<F>(value: &Value, transform: &mut F) -> Value
where
    F: FnMut(Pair<'_>) -> Value,
{
    match classify(value) {
        Node::Pair(pair) => transform(pair),
        Node::Sequence(items) => {
            Value::Array(items.iter().map(|item| map_pairs(item, transform)).collect())
        }
        Node::Mapping(map) => Value::Object(
            map.iter().map(|(key, item)| (key.clone(), map_pairs(item, transform))).collect(),
        ),
        Node::Scalar(scalar) => scalar.clone(),
    }
}

/// Whether any pair in the tree satisfies `predicate`. Short-circuits.
pub fn any_pair<F>(value: &Value, predicate: &mut F) -> bool
where
    F: FnMut(Pair<'_>) -> bool,
{
    match classify(value) {
        Node::Pair(pair) => predicate(pair),
        Node::Sequence(items) => items.iter().any(|item| any_pair(item, predicate)),
        Node::Mapping(map) => map.values().any(|item| any_pair(item, predicate)),
        Node::Scalar(_) => false,
    }
}

/// Visit every pair in the tree
pub fn for_each_pair<F>(value: &Value, visit: &mut F)
where
    F: FnMut(Pair<'_>),
{
    any_pair(value, &mut |pair| {
        visit(pair);
        false
    });
}

/// `[min_x, min_y, max_x, max_y]` over every pair, `None` for a tree without pairs
pub fn bounds(value: &Value) -> Option<[f64; 4]> {
    let mut bounds: Option<[f64; 4]> = None;
    for_each_pair(value, &mut |pair| {
        if let Some([x, y]) = pair.as_f64() {
            let b = bounds.get_or_insert([x, y, x, y]);
            b[0] = b[0].min(x);
            b[1] = b[1].min(y);
            b[2] = b[2].max(x);
            b[3] = b[3].max(y);
        }
    });
    bounds
}

/// Numeric comparison of two geometry trees.
///
/// Positions compare on their first two components, so `1` equals `1.0` and an
/// elevation dropped by a round-trip through a 2D engine does not count as a
/// difference. Everything else must match in shape.
pub fn positions_match(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(xs), Value::Array(ys)) if is_position(xs) && is_position(ys) => {
            xs.iter().zip(ys.iter()).take(2).all(|(x, y)| positions_match(x, y))
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| positions_match(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => ["type", "coordinates", "geometries"]
            .iter()
            .all(|key| match (xs.get(*key), ys.get(*key)) {
                (Some(x), Some(y)) => positions_match(x, y),
                (None, None) => true,
                _ => false,
            }),
        _ => a == b,
    }
}

fn is_position(items: &[Value]) -> bool {
    items.len() >= 2 && items.iter().all(Value::is_number)
}
