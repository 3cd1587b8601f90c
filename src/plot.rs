//! SVG figures for swept families: the equilibrium estimation cost
//! against the perturbation magnitude, and the per-agent precision
//! profiles alongside it. The cost figure carries the family tag; the
//! matching precision figure swaps `example` for `perturbation`.

use crate::sweep::Sweep;
use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;
use std::path::PathBuf;

/// value range padded by five percent so curves clear the frame
fn band(values: &[f64]) -> (f64, f64) {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let pad = (hi - lo).abs().max(1e-12) * 0.05;
    (lo - pad, hi + pad)
}

/// draw the equilibrium estimation cost across the sweep, returning the
/// path of the written figure
pub fn cost_figure(tag: &str, sweep: &Sweep, dir: &Path) -> Result<PathBuf> {
    if sweep.is_empty() {
        bail!("nothing to draw for {}", tag);
    }
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let file = dir.join(format!("{}.svg", tag));
    {
        let (xlo, xhi) = band(sweep.magnitudes());
        let (ylo, yhi) = band(sweep.costs());
        let root = SVGBackend::new(&file, (900, 600)).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(format!("equilibrium estimation cost ({})", tag), ("sans-serif", 24))
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(64)
            .build_cartesian_2d(xlo..xhi, ylo..yhi)?;
        chart
            .configure_mesh()
            .x_desc("perturbation magnitude")
            .y_desc("estimation cost")
            .draw()?;
        chart.draw_series(LineSeries::new(
            sweep.magnitudes().iter().copied().zip(sweep.costs().iter().copied()),
            BLUE.stroke_width(2),
        ))?;
        root.present()?;
    }
    Ok(file)
}

/// draw every agent's equilibrium precision across the sweep, returning
/// the path of the written figure
pub fn precision_figure(tag: &str, sweep: &Sweep, dir: &Path) -> Result<PathBuf> {
    if sweep.is_empty() {
        bail!("nothing to draw for {}", tag);
    }
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let file = dir.join(format!("{}.svg", tag.replace("example", "perturbation")));
    {
        let flat = sweep
            .precisions()
            .iter()
            .flatten()
            .copied()
            .collect::<Vec<f64>>();
        let (xlo, xhi) = band(sweep.magnitudes());
        let (ylo, yhi) = band(&flat);
        let root = SVGBackend::new(&file, (900, 600)).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(format!("equilibrium precisions ({})", tag), ("sans-serif", 24))
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(64)
            .build_cartesian_2d(xlo..xhi, ylo..yhi)?;
        chart
            .configure_mesh()
            .x_desc("perturbation magnitude")
            .y_desc("equilibrium precision")
            .draw()?;
        for index in 0..sweep.agents() {
            let color = Palette99::pick(index).mix(0.9);
            chart
                .draw_series(LineSeries::new(
                    sweep.magnitudes().iter().copied().zip(sweep.agent(index)),
                    color.stroke_width(2),
                ))?
                .label(format!("agent {}", index))
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x - 12, y), (x, y)], color.stroke_width(2))
                });
        }
        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.8))
            .draw()?;
        root.present()?;
    }
    Ok(file)
}
