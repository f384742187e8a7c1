//! Reaction orders and their linearizing transforms.

use crate::stats::LinearFit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Candidate reaction order.
///
/// Each order has an integrated rate law that becomes linear in time once the
/// absorbance is transformed: `A` for zero order, `ln A` for first order and
/// `1/A` for second order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Zero,
    First,
    Second,
}

impl Order {
    /// All candidate orders, in ascending order.
    pub const ALL: [Order; 3] = [Order::Zero, Order::First, Order::Second];

    pub fn index(self) -> usize {
        match self {
            Order::Zero => 0,
            Order::First => 1,
            Order::Second => 2,
        }
    }

    /// Apply the linearizing transform to an absorbance value.
    pub fn transform(self, absorbance: f64) -> f64 {
        match self {
            Order::Zero => absorbance,
            Order::First => absorbance.ln(),
            Order::Second => absorbance.recip(),
        }
    }

    pub fn label(self) -> String {
        format!("Order {}", self.index())
    }

    /// Label of the transformed quantity plotted against time.
    pub fn y_label(self) -> &'static str {
        match self {
            Order::Zero => "A",
            Order::First => "ln A",
            Order::Second => "1/A",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Linear fit of one order's transformed series against time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderFit {
    pub order: Order,
    pub fit: LinearFit,
}

impl OrderFit {
    /// Rate constant `k`, the magnitude of the fitted slope.
    pub fn rate_constant(&self) -> f64 {
        self.fit.slope.abs()
    }

    pub fn r_squared(&self) -> f64 {
        self.fit.r_squared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn transforms() {
        assert_relative_eq!(Order::Zero.transform(0.5), 0.5);
        assert_relative_eq!(Order::First.transform(std::f64::consts::E), 1.0);
        assert_relative_eq!(Order::Second.transform(0.25), 4.0);
    }

    #[test]
    fn labels() {
        let labels: Vec<_> = Order::ALL.iter().map(|order| order.to_string()).collect();
        assert_eq!(labels, ["Order 0", "Order 1", "Order 2"]);
        assert_eq!(Order::Second.y_label(), "1/A");
    }

    #[test]
    fn rate_constant_is_slope_magnitude() {
        let fit = LinearFit {
            slope: -0.042,
            intercept: 1.0,
            r: -0.99,
            r_squared: 0.9801,
            slope_stderr: 0.0,
            intercept_stderr: 0.0,
        };
        let order_fit = OrderFit {
            order: Order::First,
            fit,
        };
        assert_relative_eq!(order_fit.rate_constant(), 0.042);
    }
}
