use crate::analysis::KineticsReport;
use crate::data::Table;
use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Write the input table with row indices.
pub fn write_table<W: Write>(writer: &mut W, table: &Table) -> Result<()> {
    let [time_header, absorbance_header] = table.headers();
    writeln!(writer, "Input data")?;
    writeln!(writer, "{:>6} {:>14} {:>14}", "", time_header, absorbance_header)?;
    for (i_row, (t, a)) in table.time().iter().zip(table.absorbance()).enumerate() {
        writeln!(writer, "{i_row:>6} {t:>14.6} {a:>14.6}")?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Write the per-order results followed by the verdict.
pub fn write_results<W: Write>(writer: &mut W, report: &KineticsReport) -> Result<()> {
    writeln!(writer, "Kinetics analysis")?;
    writeln!(writer, "{:<8} {:>12} {:>12} {:>14}", "Order", "r", "R²", "k")?;
    for order_fit in report.fits() {
        writeln!(
            writer,
            "{:<8} {:>12.6} {:>12.6} {:>14.6e}",
            order_fit.order.label(),
            order_fit.fit.r,
            order_fit.r_squared(),
            order_fit.rate_constant()
        )?;
    }
    writeln!(writer)?;
    writeln!(writer, "{}", report.verdict())?;
    writeln!(writer, "{}", report.interpretation())?;
    Ok(())
}

/// Save the input table and every fit as pretty-printed JSON.
pub fn save_json<P: AsRef<Path>>(file: P, table: &Table, report: &KineticsReport) -> Result<()> {
    let file = file.as_ref();
    let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
    let mut writer = BufWriter::new(file);

    let fits: Vec<_> = report
        .fits()
        .iter()
        .map(|order_fit| {
            serde_json::json!({
                "order": order_fit.order,
                "label": order_fit.order.label(),
                "fit": order_fit.fit,
                "k": order_fit.rate_constant(),
            })
        })
        .collect();

    let results = serde_json::json!({
        "data": table,
        "fits": fits,
        "best": report.best(),
    });

    serde_json::to_writer_pretty(&mut writer, &results).context("failed to serialize results")?;
    writer.flush().context("failed to flush writer stream")?;
    Ok(())
}
