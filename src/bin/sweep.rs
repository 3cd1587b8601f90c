//! Sweep Binary
//!
//! Solves one family for its Nash equilibrium across a grid of
//! perturbation magnitudes and prints the cost trajectory against the
//! plain GLS baseline at magnitude zero.
//!
//! Options: --family, --reach, --fresh, --cache

use clap::Parser;
use colored::Colorize;
use glsgame::family::Family;
use glsgame::sweep::Cache;
use glsgame::sweep::Sweep;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Family tag: example1, example2, example3-d<d>, or example4-d<d>
    #[arg(long, default_value = "example1")]
    family: String,
    /// Largest perturbation magnitude on the grid
    #[arg(long, default_value_t = 1e-3)]
    reach: f64,
    /// Re-sweep even when the cache already holds this family
    #[arg(long)]
    fresh: bool,
    /// Cache file location
    #[arg(long, default_value = glsgame::CACHE_FILE)]
    cache: std::path::PathBuf,
}

fn main() -> anyhow::Result<()> {
    glsgame::log();
    let args = Args::parse();
    let family = args.family.parse::<Family>()?;
    let mut cache = Cache::load(&args.cache);
    if args.fresh {
        cache.forget(&family);
    }
    cache.ensure(&family, args.reach)?;
    let Some(sweep) = cache.get(&family) else {
        anyhow::bail!("cache lost {} right after solving it", family);
    };
    render(&family, sweep);
    Ok(())
}

/// every tenth grid point, then the verdict at the cheapest one
fn render(family: &Family, sweep: &Sweep) {
    let baseline = sweep.costs()[0];
    println!();
    println!("{}", format!("{} ({} agents)", family, sweep.agents()).bold());
    println!(
        "{} {} {}",
        format!("{:>14}", "magnitude").bold(),
        format!("{:>14}", "cost").bold(),
        format!("{:>12}", "vs plain").bold(),
    );
    for (index, (&magnitude, &cost)) in sweep.magnitudes().iter().zip(sweep.costs()).enumerate() {
        if index % 10 != 0 && index + 1 != sweep.len() {
            continue;
        }
        let edge = cost - baseline;
        let edge = format!("{:>+12.3e}", edge);
        let edge = if cost < baseline { edge.green() } else { edge.normal() };
        println!("{:>14.6e} {:>14.9} {}", magnitude, cost, edge);
    }
    println!();
    let Some((magnitude, cost)) = sweep.best() else {
        return;
    };
    if cost < baseline {
        println!(
            "{}",
            format!(
                "perturbation beats plain GLS: cost {:.9} at magnitude {:e} ({:+.3e})",
                cost,
                magnitude,
                cost - baseline
            )
            .green()
            .bold()
        );
    } else {
        println!(
            "{}",
            format!("no magnitude in (0, {:e}] beats plain GLS here", sweep.reach()).yellow()
        );
    }
    if let Some(index) = sweep.magnitudes().iter().position(|&m| m == magnitude) {
        let profile = sweep.precisions()[index]
            .iter()
            .map(|precision| format!("{:.6}", precision))
            .collect::<Vec<String>>()
            .join(", ");
        println!("equilibrium precisions: [{}]", profile);
    }
}
