//! Writing values back into a document.
//!
//! Every node of a resolved chain holds its own copy of the value it
//! addressed. After the terminal node is changed, [`put`] and [`delete`] walk
//! `previous` links back to the root and store each node's value into its
//! predecessor at the [`Location`] the resolver recorded.

use log::debug;

use crate::{
    error::SelectError,
    node::{Chain, Location, NodeId},
    resolver::resolve,
    value::Value,
};

/// Set the value addressed by the chain, creating missing steps.
///
/// Returns the updated document.
pub fn put(mut chain: Chain, value: Value) -> Result<Value, SelectError> {
    debug!("put into chain of {} node(s)", chain.len());

    resolve(&mut chain, true)?;
    let terminal = chain.terminal();
    chain.node_mut(terminal).value = Some(value);
    propagate(&mut chain, terminal)?;

    Ok(chain.into_document())
}

/// Remove the value addressed by the chain.
///
/// Deleting the root leaves an empty mapping. Returns the updated document.
pub fn delete(mut chain: Chain) -> Result<Value, SelectError> {
    debug!("delete from chain of {} node(s)", chain.len());

    resolve(&mut chain, false)?;
    let terminal = chain.terminal();
    let Some((previous, node)) = chain.with_previous_mut(terminal) else {
        return Ok(Value::empty_object());
    };

    let location = node
        .location
        .as_ref()
        .ok_or_else(|| SelectError::UnsupportedSelector {
            selector: node.selector.raw.clone(),
        })?;

    match (previous.value.as_mut(), location) {
        (Some(Value::Object(map)), Location::Key(key)) => {
            map.shift_remove(key);
        }
        (Some(Value::Array(arr)), Location::Index(index)) if *index < arr.len() => {
            arr.remove(*index);
        }
        (value, _) => {
            return Err(SelectError::UnsupportedTypeForSelector {
                selector: node.selector.clone(),
                value: value.cloned().unwrap_or(Value::Null),
            });
        }
    }

    if let Some(previous_id) = chain.node(terminal).previous() {
        propagate(&mut chain, previous_id)?;
    }
    Ok(chain.into_document())
}

/// Write `from` into its predecessor, then that node into its own, up to the root.
fn propagate(chain: &mut Chain, from: NodeId) -> Result<(), SelectError> {
    let mut current = from;
    while let Some((previous, node)) = chain.with_previous_mut(current) {
        let Some(previous_id) = node.previous() else {
            break;
        };
        let location = node.location.as_ref().ok_or_else(|| SelectError::UnsupportedSelector {
            selector: node.selector.raw.clone(),
        })?;
        let value = node.value.clone().unwrap_or(Value::Null);

        match (previous.value.as_mut(), location) {
            (Some(Value::Object(map)), Location::Key(key)) => {
                map.insert(key.clone(), value);
            }
            (Some(Value::Array(arr)), Location::Index(index)) if *index < arr.len() => {
                arr[*index] = value;
            }
            (found, _) => {
                return Err(SelectError::UnsupportedTypeForSelector {
                    selector: node.selector.clone(),
                    value: found.cloned().unwrap_or(Value::Null),
                });
            }
        }

        current = previous_id;
    }
    Ok(())
}
