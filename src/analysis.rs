use crate::data::Table;
use crate::model::{Order, OrderFit};
use crate::stats::linear_regression;
use anyhow::{Context, Result};
use serde::Serialize;

/// Fits every candidate order to a table.
pub struct Analyzer<'a> {
    table: &'a Table,
}

impl<'a> Analyzer<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    /// Fit the transformed absorbance of each order against time and select
    /// the one with the highest R².
    pub fn analyze(&self) -> Result<KineticsReport> {
        let time = self.table.time();

        let mut fits = Vec::with_capacity(Order::ALL.len());
        for order in Order::ALL {
            let y: Vec<_> = self
                .table
                .absorbance()
                .iter()
                .map(|&a| order.transform(a))
                .collect();

            let fit = linear_regression(time, &y)
                .with_context(|| format!("failed to fit {order}"))?;
            log::debug!("{order}: {fit:?}");

            fits.push(OrderFit { order, fit });
        }

        Ok(KineticsReport::new(fits))
    }
}

/// Fits of all candidate orders and the best one among them.
#[derive(Debug, Serialize)]
pub struct KineticsReport {
    fits: Vec<OrderFit>,
    best: Order,
}

impl KineticsReport {
    /// Build a report, picking the first fit with the maximum R².
    ///
    /// `fits` must not be empty. NaN values of R² never beat a number, and if
    /// every R² is NaN the first fit is kept.
    fn new(fits: Vec<OrderFit>) -> Self {
        let mut i_best = 0;
        for (i_fit, fit) in fits.iter().enumerate() {
            let r_squared = fit.r_squared();
            let best_r_squared = fits[i_best].r_squared();
            if r_squared > best_r_squared || (best_r_squared.is_nan() && !r_squared.is_nan()) {
                i_best = i_fit;
            }
        }
        let best = fits[i_best].order;
        Self { fits, best }
    }

    pub fn fits(&self) -> &[OrderFit] {
        &self.fits
    }

    pub fn best(&self) -> Order {
        self.best
    }

    pub fn best_fit(&self) -> &OrderFit {
        &self.fits[self.best.index()]
    }

    pub fn verdict(&self) -> String {
        format!("Reaction follows {} kinetics", self.best)
    }

    pub fn interpretation(&self) -> String {
        format!(
            "The model with the highest R² ({:.3}) shows the best linearity \
             against the experimental data.",
            self.best_fit().r_squared()
        )
    }
}
