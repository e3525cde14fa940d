//! Selector resolution.
//!
//! [`resolve_node`] is the dispatcher: it checks the preconditions shared by
//! every step kind and hands the previous node's value to the resolver for the
//! node's selector. [`resolve`] walks a whole [`Chain`] from the root to the
//! terminal node.
//!
//! In create mode a missing key, index or append slot is created in the
//! previous value as a `Null` placeholder and the node resolves to nothing;
//! the caller is expected to write a concrete value there afterwards
//! (see [`crate::mutate::put`]).

use log::{debug, trace};

use crate::{
    condition::Condition,
    error::SelectError,
    node::{Chain, Location, NodeId},
    selector::{Selector, SelectorKind},
    value::Value,
};

/// Most placeholder elements an index step may add past the end of a sequence.
pub const MAX_CREATE_PADDING: usize = 65_536;

/// Outcome of a single resolver.
#[derive(Debug)]
enum Step {
    /// An existing value at a location inside the previous value
    Found(Value, Location),
    /// A placeholder was created at the location; no value yet
    Created(Location),
    /// A value computed from the previous value, with no location
    Computed(Value),
    /// Nothing matched in create mode; the selector must become an append
    Deferred,
}

/// Resolve a single node against its predecessor's value.
///
/// The resolved value (or `None`) is stored on the node and returned.
/// `Ok(None)` means the step created a placeholder, or that a dynamic
/// selector was rewritten into [`SelectorKind::NextAvailableIndex`] and must
/// be resolved again.
pub fn resolve_node(
    chain: &mut Chain,
    id: NodeId,
    create: bool,
) -> Result<Option<Value>, SelectError> {
    let (previous, node) = chain
        .with_previous_mut(id)
        .ok_or(SelectError::MissingPreviousNode)?;

    let Some(previous_value) = previous.value.as_mut().filter(|v| !v.is_null()) else {
        return Err(SelectError::UnexpectedPreviousNilValue {
            selector: previous.selector.current.clone(),
        });
    };

    trace!("resolving {} (create={})", node.selector, create);

    let selector = &node.selector;
    let step = match selector.kind() {
        SelectorKind::Property(name) => resolve_property(previous_value, selector, name, create)?,
        SelectorKind::Index(index) => resolve_index(previous_value, selector, *index, create)?,
        SelectorKind::NextAvailableIndex => {
            resolve_next_available_index(previous_value, selector, create)?
        }
        SelectorKind::Dynamic(conditions) => {
            resolve_dynamic(previous_value, selector, conditions, create)?
        }
        SelectorKind::Length => resolve_length(previous_value, selector)?,
        SelectorKind::Type => resolve_type(previous_value, selector)?,
        SelectorKind::Root => {
            return Err(SelectError::UnsupportedSelector {
                selector: selector.raw.clone(),
            });
        }
    };

    let (value, location) = match step {
        Step::Found(value, location) => (Some(value), Some(location)),
        Step::Created(location) => (None, Some(location)),
        Step::Computed(value) => (Some(value), None),
        Step::Deferred => {
            debug!("no match for {}, deferring to append", node.selector.current);
            node.selector.defer_to_append();
            (None, None)
        }
    };

    node.value = value.clone();
    node.location = location;
    Ok(value)
}

/// Resolve every node of the chain in order and return the terminal value.
///
/// Stops at the first error. In create mode a dynamic selector with no match
/// is re-resolved as an append, and an intermediate step that resolved to
/// nothing (or to null) is seeded with an empty container shaped for the
/// following step.
pub fn resolve(chain: &mut Chain, create: bool) -> Result<Option<Value>, SelectError> {
    debug!("resolving chain of {} node(s) (create={})", chain.len(), create);

    let mut value = chain.document().cloned();
    let ids: Vec<NodeId> = chain.ids().skip(1).collect();

    for id in ids {
        let dynamic = matches!(chain.node(id).selector.kind(), SelectorKind::Dynamic(_));
        value = resolve_node(chain, id, create)?;

        if !create {
            continue;
        }

        if dynamic && chain.node(id).selector.kind() == &SelectorKind::NextAvailableIndex {
            value = resolve_node(chain, id, create)?;
        }

        if value.as_ref().is_none_or(Value::is_null) {
            let seed = chain
                .node(id)
                .next()
                .and_then(|next| empty_value_for(chain.node(next).selector.kind()));
            if let Some(seed) = seed {
                debug!("seeding {} with {}", chain.node(id).selector.current, seed);
                chain.node_mut(id).value = Some(seed.clone());
                value = Some(seed);
            }
        }
    }

    Ok(value)
}

/// Resolve the chain in read mode and require a value at the end.
pub fn select(chain: &mut Chain) -> Result<Value, SelectError> {
    match resolve(chain, false)? {
        Some(value) => Ok(value),
        None => {
            let terminal = chain.node(chain.terminal());
            let previous_value = terminal
                .previous()
                .and_then(|p| chain.node(p).value.clone())
                .unwrap_or(Value::Null);
            Err(SelectError::ValueNotFound {
                selector: terminal.selector.current.clone(),
                previous_value,
            })
        }
    }
}

/// Container to create for a step that must be followed by `next`.
fn empty_value_for(next: &SelectorKind) -> Option<Value> {
    match next {
        SelectorKind::Property(_) => Some(Value::empty_object()),
        SelectorKind::Index(_) | SelectorKind::NextAvailableIndex | SelectorKind::Dynamic(_) => {
            Some(Value::Array(Vec::new()))
        }
        _ => None,
    }
}

fn unsupported(selector: &Selector, value: &Value) -> SelectError {
    SelectError::UnsupportedTypeForSelector {
        selector: selector.clone(),
        value: value.clone(),
    }
}

fn not_found(selector: &Selector, previous_value: &Value) -> SelectError {
    SelectError::ValueNotFound {
        selector: selector.current.clone(),
        previous_value: previous_value.clone(),
    }
}

fn resolve_property(
    previous: &mut Value,
    selector: &Selector,
    name: &str,
    create: bool,
) -> Result<Step, SelectError> {
    let map = match previous {
        Value::Object(map) => map,
        other => return Err(unsupported(selector, other)),
    };

    if let Some(found) = map.get(name) {
        return Ok(Step::Found(found.clone(), Location::Key(name.to_string())));
    }
    if !create {
        return Err(not_found(selector, &Value::Object(map.clone())));
    }

    map.insert(name.to_string(), Value::Null);
    Ok(Step::Created(Location::Key(name.to_string())))
}

fn resolve_index(
    previous: &mut Value,
    selector: &Selector,
    index: usize,
    create: bool,
) -> Result<Step, SelectError> {
    let arr = match previous {
        Value::Array(arr) => arr,
        other => return Err(unsupported(selector, other)),
    };

    if let Some(found) = arr.get(index) {
        return Ok(Step::Found(found.clone(), Location::Index(index)));
    }
    if !create {
        return Err(not_found(selector, &Value::Array(arr.clone())));
    }

    // index >= arr.len() here
    let padding = index - arr.len();
    if padding > MAX_CREATE_PADDING {
        return Err(SelectError::IndexTooLarge {
            selector: selector.current.clone(),
            index,
            length: arr.len(),
        });
    }

    arr.resize(index + 1, Value::Null);
    Ok(Step::Created(Location::Index(index)))
}

fn resolve_next_available_index(
    previous: &mut Value,
    selector: &Selector,
    create: bool,
) -> Result<Step, SelectError> {
    let arr = match previous {
        Value::Array(arr) => arr,
        other => return Err(unsupported(selector, other)),
    };

    // there is never an existing value at the next slot
    if !create {
        return Err(not_found(selector, &Value::Array(arr.clone())));
    }

    let index = arr.len();
    arr.push(Value::Null);
    Ok(Step::Created(Location::Index(index)))
}

fn resolve_dynamic(
    previous: &Value,
    selector: &Selector,
    conditions: &[Condition],
    create: bool,
) -> Result<Step, SelectError> {
    let matches_all = |candidate: &Value| conditions.iter().all(|c| c.matches(candidate));

    let found = match previous {
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .find(|(_, v)| matches_all(v))
            .map(|(i, v)| Step::Found(v.clone(), Location::Index(i))),
        Value::Object(map) => map
            .iter()
            .find(|(_, v)| matches_all(v))
            .map(|(k, v)| Step::Found(v.clone(), Location::Key(k.clone()))),
        other => return Err(unsupported(selector, other)),
    };

    match found {
        Some(step) => Ok(step),
        None if create => Ok(Step::Deferred),
        None => Err(not_found(selector, previous)),
    }
}

fn resolve_length(previous: &Value, selector: &Selector) -> Result<Step, SelectError> {
    let len = match previous {
        Value::Array(arr) => arr.len(),
        Value::Object(map) => map.len(),
        Value::String(s) => s.chars().count(),
        other => return Err(unsupported(selector, other)),
    };
    Ok(Step::Computed(Value::Integer(len as i64)))
}

fn resolve_type(previous: &Value, selector: &Selector) -> Result<Step, SelectError> {
    match previous.kind() {
        Some(kind) => Ok(Step::Computed(Value::String(kind.as_str().to_string()))),
        None => Err(unsupported(selector, previous)),
    }
}
