use folio_model::order::order_for_position;
use folio_model::{Direction, OrderUpdate, OrderedEntity};

/// Index the item at `index` lands on, or `None` when the move would leave
/// `[0, len - 1]`.
pub fn target_index(len: usize, index: usize, direction: Direction) -> Option<usize> {
    if index >= len {
        return None;
    }
    let target = match direction {
        Direction::Up => index.checked_sub(1)?,
        Direction::Down => index + 1,
    };
    (target < len).then_some(target)
}

/// Moves `items[index]` one step in `direction`. Returns `false` and leaves
/// the slice untouched when the move is out of range.
pub fn move_item<T>(items: &mut Vec<T>, index: usize, direction: Direction) -> bool {
    let Some(target) = target_index(items.len(), index, direction) else {
        return false;
    };
    let item = items.remove(index);
    items.insert(target, item);
    true
}

/// Assigns `(position + 1) * 10` to every item and returns the bulk write.
pub fn renumber<E: OrderedEntity>(items: &mut [E]) -> Vec<OrderUpdate> {
    items
        .iter_mut()
        .enumerate()
        .map(|(position, item)| {
            let order = order_for_position(position);
            item.set_order(order);
            OrderUpdate {
                id: item.id(),
                order,
            }
        })
        .collect()
}
