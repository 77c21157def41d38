//! JSON encoding of the whole cart, as stored in the snapshot slot.
//!
//! The layout matches what the browser shop kept in local storage:
//!
//! ```json
//! {"items":[{"id":1,"title":"A","price":10.0,"image":"","quantity":2}],"totalPrice":20.0}
//! ```
//!
//! There is no schema version. Anything that does not decode into a valid
//! cart is rejected and the caller falls back to an empty cart.

use std::collections::HashSet;

use serde::Deserialize;

use crate::cart::{CartLine, CartState};
use crate::error::CoreError;

/// On-disk shape. `totalPrice` is derived, so it is not read back.
#[derive(Deserialize)]
struct RawSnapshot {
    items: Vec<CartLine>,
}

/// Encode the full cart state.
///
/// Fails on a line that [`deserialize`] would reject, such as a NaN price,
/// which would otherwise be written as `null` and lose the whole cart on the
/// next load.
pub fn serialize(state: &CartState) -> Result<String, CoreError> {
    check_lines(state.items())?;
    Ok(serde_json::to_string(state)?)
}

/// Decode a snapshot.
///
/// The stored total is ignored and recomputed from the lines. Duplicate ids,
/// zero quantities and negative or non-finite prices are rejected.
pub fn deserialize(text: &str) -> Result<CartState, CoreError> {
    let raw: RawSnapshot = serde_json::from_str(text)?;
    check_lines(&raw.items)?;
    Ok(CartState::from_lines(raw.items))
}

fn check_lines(lines: &[CartLine]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(lines.len());
    for line in lines {
        if !seen.insert(line.id) {
            return Err(CoreError::Snapshot(format!("duplicate line for product {}", line.id)));
        }
        if line.quantity == 0 {
            return Err(CoreError::Snapshot(format!("product {} has quantity 0", line.id)));
        }
        if !line.price.is_finite() || line.price < 0.0 {
            return Err(CoreError::Snapshot(format!(
                "product {} has invalid price {}",
                line.id, line.price
            )));
        }
    }
    Ok(())
}
