/// Non-negative sales and returns derived from one signed net quantity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitQty {
    pub sales_qty: f64,
    pub return_qty: f64,
}

/// Split a net quantity: positive part is sales, negated negative part is returns.
///
/// `sales_qty - return_qty == net` and both are `>= 0`.
pub fn split_returns(net: f64) -> SplitQty {
    // `+ 0.0` turns -0.0 into 0.0
    SplitQty {
        sales_qty: net.max(0.0) + 0.0,
        return_qty: (-net).max(0.0) + 0.0,
    }
}

/// [`split_returns`] over a sequence, returning aligned `(sales, returns)`.
pub fn split_all(nets: &[f64]) -> (Vec<f64>, Vec<f64>) {
    nets.iter()
        .map(|&n| {
            let s = split_returns(n);
            (s.sales_qty, s.return_qty)
        })
        .unzip()
}
