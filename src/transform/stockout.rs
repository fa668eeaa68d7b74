/// Demand outstripped supply: `sales_qty > delivery_qty`, strictly.
pub fn is_stockout(sales_qty: f64, delivery_qty: f64) -> bool {
    sales_qty > delivery_qty
}

/// [`is_stockout`] over aligned sequences. Extra elements of the longer slice are ignored.
pub fn classify_stockout(sales_qty: &[f64], delivery_qty: &[f64]) -> Vec<bool> {
    sales_qty
        .iter()
        .zip(delivery_qty)
        .map(|(&s, &d)| is_stockout(s, d))
        .collect()
}
