use rust_decimal::Decimal;

use crate::domain::{OrderCreate, OrderItem, OrderTotals};

use super::OrderError;

/// Computes the authoritative subtotal and total of an order.
///
/// `subtotal` is the sum of `price * quantity` over all items and `total` adds shipping
/// (zero when absent). An order without items costs exactly its shipping.
///
/// # Errors
/// Returns [`OrderError::ValidationError`] for a negative price or shipping, a quantity
/// below one, or amounts too large to represent.
pub fn price_order(order: &OrderCreate) -> Result<OrderTotals, OrderError> {
    let shipping = order.shipping.unwrap_or(Decimal::ZERO);
    if shipping < Decimal::ZERO {
        return Err(OrderError::ValidationError(format!(
            "shipping must not be negative, got {shipping}"
        )));
    }

    let subtotal = order
        .items
        .iter()
        .enumerate()
        .try_fold(Decimal::ZERO, |subtotal, (index, item)| {
            let line = line_amount(index, item)?;
            subtotal.checked_add(line).ok_or_else(out_of_range)
        })?;

    let total = subtotal.checked_add(shipping).ok_or_else(out_of_range)?;

    Ok(OrderTotals {
        subtotal,
        shipping,
        total,
    })
}

fn line_amount(index: usize, item: &OrderItem) -> Result<Decimal, OrderError> {
    if item.price < Decimal::ZERO {
        return Err(OrderError::ValidationError(format!(
            "items[{index}].price must not be negative, got {}",
            item.price
        )));
    }
    if item.quantity < 1 {
        return Err(OrderError::ValidationError(format!(
            "items[{index}].quantity must be at least 1, got {}",
            item.quantity
        )));
    }

    item.price
        .checked_mul(Decimal::from(item.quantity))
        .ok_or_else(out_of_range)
}

fn out_of_range() -> OrderError {
    OrderError::ValidationError("order amount out of range".to_string())
}
