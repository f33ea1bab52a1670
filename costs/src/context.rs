//! Cost-carrying wrappers and the early-return macros built on them.

use crate::OperationCost;

/// A value together with the hashing work that produced it.
#[must_use]
#[derive(Debug, Eq, PartialEq)]
pub struct CostContext<T> {
    /// The operation's result.
    pub value: T,
    /// Hash calls spent computing `value`.
    pub cost: OperationCost,
}

impl<T> CostContext<T> {
    /// Move the cost into `acc_cost` and return the value.
    pub fn unwrap_add_cost(self, acc_cost: &mut OperationCost) -> T {
        *acc_cost += self.cost;
        self.value
    }

    /// Discard the cost and return the value.
    pub fn unwrap(self) -> T {
        self.value
    }

    /// Transform the value; the cost is unchanged.
    pub fn map<B>(self, f: impl FnOnce(T) -> B) -> CostContext<B> {
        CostContext {
            value: f(self.value),
            cost: self.cost,
        }
    }
}

/// A fallible operation and its cost. Errors carry the cost spent before
/// failing.
pub type CostResult<T, E> = CostContext<Result<T, E>>;

impl<T, E> CostResult<T, E> {
    /// Run a costed step on `Ok`, summing both costs. An `Err` passes
    /// through with its cost.
    pub fn flat_map_ok<B>(self, f: impl FnOnce(T) -> CostResult<B, E>) -> CostResult<B, E> {
        let mut cost = self.cost;
        let value = match self.value {
            Ok(x) => f(x).unwrap_add_cost(&mut cost),
            Err(e) => Err(e),
        };
        CostContext { value, cost }
    }
}

/// Attach a cost to any value.
pub trait CostsExt {
    /// Pair `self` with `cost`.
    fn wrap_with_cost(self, cost: OperationCost) -> CostContext<Self>
    where
        Self: Sized,
    {
        CostContext { value: self, cost }
    }
}

impl<T> CostsExt for T {}

/// `?` for functions returning [`CostResult`].
///
/// Takes a `CostResult` expression, adds its cost to the `&mut` accumulator
/// and yields the `Ok` value. On `Err` the enclosing function returns the
/// error with everything accumulated so far.
#[macro_export]
macro_rules! cost_return_on_error {
    ( &mut $cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let costed = { $($body)+ };
            match costed.unwrap_add_cost(&mut $cost) {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}

/// Like [`cost_return_on_error!`] but for a plain `Result`: nothing is added
/// to the accumulator, which is only read on the error path.
#[macro_export]
macro_rules! cost_return_on_error_no_add {
    ( &$cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            match { $($body)+ } {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}
