use super::{CartItem, CartLine, CartState};

/// A cart mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add one unit. An existing line for the same id gains a unit and keeps
    /// its own title, price and image.
    Add(CartItem),
    /// Drop the line for this id. Unknown ids are ignored.
    Remove(u64),
    /// Set the quantity of an existing line. Zero or negative removes the line.
    SetQuantity { id: u64, quantity: i64 },
    /// Empty the cart.
    Clear,
}

/// Apply `action` to `state` and return the new state.
///
/// Pure: no persistence and no notification happen here. The total is
/// recomputed on every call, including no-op actions.
pub fn reduce(mut state: CartState, action: &CartAction) -> CartState {
    match action {
        CartAction::Add(item) => match state.items.iter_mut().find(|line| line.id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => state.items.push(CartLine::from_item(item)),
        },
        CartAction::Remove(id) => state.items.retain(|line| line.id != *id),
        CartAction::SetQuantity { id, quantity } => {
            if let Some(pos) = state.items.iter().position(|line| line.id == *id) {
                if *quantity <= 0 {
                    state.items.remove(pos);
                } else {
                    state.items[pos].quantity = u32::try_from(*quantity).unwrap_or(u32::MAX);
                }
            }
        }
        CartAction::Clear => state.items.clear(),
    }
    state.recompute_total();
    state
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::snapshot;

    fn item(id: u64, title: &str, price: f64) -> CartItem {
        CartItem {
            id,
            title: title.to_string(),
            price,
            image: format!("https://img.example/{id}.png"),
        }
    }

    fn apply(state: CartState, actions: &[CartAction]) -> CartState {
        actions.iter().fold(state, reduce)
    }

    fn ids(state: &CartState) -> Vec<u64> {
        state.items().iter().map(|line| line.id).collect()
    }

    fn assert_total_consistent(state: &CartState) {
        let expected: f64 = state
            .items()
            .iter()
            .fold(0.0, |acc, line| acc + line.price * f64::from(line.quantity));
        assert_eq!(state.total_price(), expected);
    }

    #[test]
    fn worked_example() {
        let mut state = CartState::new();

        state = reduce(state, &CartAction::Add(item(1, "A", 10.0)));
        assert_eq!(ids(&state), [1]);
        assert_eq!(state.line(1).unwrap().quantity, 1);
        assert_eq!(state.total_price(), 10.0);

        state = reduce(state, &CartAction::Add(item(1, "A", 10.0)));
        assert_eq!(state.line(1).unwrap().quantity, 2);
        assert_eq!(state.total_price(), 20.0);

        state = reduce(state, &CartAction::Add(item(2, "B", 5.0)));
        assert_eq!(ids(&state), [1, 2]);
        assert_eq!(state.total_price(), 25.0);

        state = reduce(state, &CartAction::SetQuantity { id: 1, quantity: 0 });
        assert_eq!(ids(&state), [2]);
        assert_eq!(state.total_price(), 5.0);

        state = reduce(state, &CartAction::Clear);
        assert!(state.is_empty());
        assert_eq!(state.total_price(), 0.0);
    }

    #[test]
    fn distinct_adds_keep_first_seen_order() {
        let state = apply(
            CartState::new(),
            &[
                CartAction::Add(item(3, "C", 1.0)),
                CartAction::Add(item(1, "A", 2.0)),
                CartAction::Add(item(3, "C", 1.0)),
                CartAction::Add(item(2, "B", 3.0)),
            ],
        );
        assert_eq!(ids(&state), [3, 1, 2]);
        assert_total_consistent(&state);
    }

    #[test]
    fn repeated_add_keeps_first_line_details() {
        let state = apply(
            CartState::new(),
            &[
                CartAction::Add(item(7, "Backpack", 109.95)),
                CartAction::Add(item(7, "Renamed", 1.0)),
                CartAction::Add(CartItem { image: String::new(), ..item(7, "Other", 2.0) }),
            ],
        );
        assert_eq!(state.items().len(), 1);
        let line = state.line(7).unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.title, "Backpack");
        assert_eq!(line.price, 109.95);
        assert_eq!(line.image, "https://img.example/7.png");
        assert_total_consistent(&state);
    }

    #[test]
    fn set_quantity_positive_sets_exactly() {
        let state = apply(
            CartState::new(),
            &[
                CartAction::Add(item(1, "A", 4.0)),
                CartAction::SetQuantity { id: 1, quantity: 6 },
            ],
        );
        assert_eq!(state.line(1).unwrap().quantity, 6);
        assert_eq!(state.total_price(), 24.0);
    }

    #[test]
    fn set_quantity_negative_removes_line() {
        let state = apply(
            CartState::new(),
            &[
                CartAction::Add(item(1, "A", 4.0)),
                CartAction::Add(item(2, "B", 1.0)),
                CartAction::SetQuantity { id: 1, quantity: -3 },
            ],
        );
        assert_eq!(ids(&state), [2]);
        assert_eq!(state.total_price(), 1.0);
    }

    #[test]
    fn set_quantity_unknown_id_is_noop() {
        let before = apply(CartState::new(), &[CartAction::Add(item(1, "A", 4.0))]);
        let after = reduce(before.clone(), &CartAction::SetQuantity { id: 9, quantity: 5 });
        assert_eq!(before, after);
    }

    #[test]
    fn set_quantity_saturates_huge_values() {
        let state = apply(
            CartState::new(),
            &[
                CartAction::Add(item(1, "A", 1.0)),
                CartAction::SetQuantity { id: 1, quantity: i64::MAX },
            ],
        );
        assert_eq!(state.line(1).unwrap().quantity, u32::MAX);
        assert_total_consistent(&state);
    }

    #[test]
    fn remove_unknown_id_leaves_state_unchanged() {
        let before = apply(
            CartState::new(),
            &[CartAction::Add(item(1, "A", 4.0)), CartAction::Add(item(2, "B", 6.0))],
        );
        let after = reduce(before.clone(), &CartAction::Remove(42));
        assert_eq!(before, after);
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let state = apply(
            CartState::new(),
            &[
                CartAction::Add(item(1, "A", 1.0)),
                CartAction::Add(item(2, "B", 2.0)),
                CartAction::Add(item(3, "C", 3.0)),
                CartAction::Remove(2),
            ],
        );
        assert_eq!(ids(&state), [1, 3]);
        assert_eq!(state.total_price(), 4.0);
    }

    #[test]
    fn clear_always_empties() {
        assert_eq!(reduce(CartState::new(), &CartAction::Clear), CartState::new());

        let state = apply(
            CartState::new(),
            &[
                CartAction::Add(item(1, "A", 1.5)),
                CartAction::Add(item(1, "A", 1.5)),
                CartAction::Clear,
            ],
        );
        assert!(state.is_empty());
        assert_eq!(state.total_price(), 0.0);
    }

    #[test]
    fn total_tracks_every_step() {
        let actions = [
            CartAction::Add(item(1, "A", 0.1)),
            CartAction::Add(item(2, "B", 0.2)),
            CartAction::Add(item(1, "A", 0.1)),
            CartAction::SetQuantity { id: 2, quantity: 5 },
            CartAction::Remove(1),
            CartAction::Add(item(3, "C", 19.99)),
            CartAction::SetQuantity { id: 3, quantity: -1 },
        ];
        let mut state = CartState::new();
        for action in &actions {
            state = reduce(state, action);
            assert_total_consistent(&state);
        }
        assert_eq!(ids(&state), [2]);
    }

    fn arb_action() -> impl Strategy<Value = CartAction> {
        prop_oneof![
            4 => (1u64..6, 0.0f64..1000.0)
                .prop_map(|(id, price)| CartAction::Add(item(id, "Product", price))),
            1 => (1u64..6).prop_map(CartAction::Remove),
            2 => (1u64..6, -3i64..10)
                .prop_map(|(id, quantity)| CartAction::SetQuantity { id, quantity }),
            1 => Just(CartAction::Clear),
        ]
    }

    proptest! {
        /// Lines stay unique and positive, the total matches the lines, and
        /// every intermediate state survives a snapshot round trip.
        #[test]
        fn every_step_keeps_cart_consistent(
            actions in prop::collection::vec(arb_action(), 0..40),
        ) {
            let mut state = CartState::new();
            for action in &actions {
                state = reduce(state, action);

                let mut seen = ids(&state);
                seen.sort_unstable();
                seen.dedup();
                prop_assert_eq!(seen.len(), state.items().len());
                prop_assert!(state.items().iter().all(|line| line.quantity >= 1));

                let expected = state
                    .items()
                    .iter()
                    .fold(0.0, |acc, line| acc + line.price * f64::from(line.quantity));
                prop_assert_eq!(state.total_price(), expected);

                let text = snapshot::serialize(&state).unwrap();
                prop_assert_eq!(snapshot::deserialize(&text).unwrap(), state.clone());
            }
        }

        #[test]
        fn distinct_adds_follow_first_seen_order(
            picks in prop::collection::vec(1u64..20, 0..30),
        ) {
            let actions: Vec<_> = picks
                .iter()
                .map(|&id| CartAction::Add(item(id, "Product", 1.5)))
                .collect();
            let state = apply(CartState::new(), &actions);

            let mut first_seen = Vec::new();
            for id in picks {
                if !first_seen.contains(&id) {
                    first_seen.push(id);
                }
            }
            prop_assert_eq!(ids(&state), first_seen);
        }

        #[test]
        fn repeated_adds_count_up(n in 1u32..200, price in 0.0f64..1000.0) {
            let action = CartAction::Add(item(4, "Product", price));
            let state = (0..n).fold(CartState::new(), |state, _| reduce(state, &action));
            prop_assert_eq!(state.items().len(), 1);
            prop_assert_eq!(state.line(4).unwrap().quantity, n);
        }
    }
}
