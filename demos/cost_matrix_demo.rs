//! Build cost matrices for two small point clouds and read off, per source point, the
//! cheapest target under each metric.
//!
//! Run: `cargo run --example cost_matrix_demo`

use costmat::cost;
use costmat::Metric;
use ndarray::{array, Array2};

fn main() -> costmat::Result<()> {
    let sources = array![[0.0, 0.0], [3.0, 4.0], [-2.0, 1.0], [5.0, -1.0]];
    let targets = array![[0.5, 0.5], [2.5, 4.5], [4.0, -2.0]];

    let metrics = [
        Metric::SqEuclidean,
        Metric::Euclidean,
        Metric::Manhattan,
        "lp:4".parse::<Metric>()?,
    ];

    let mut out = Array2::<f64>::zeros((0, 0));
    for metric in metrics {
        cost::cost_matrix(metric, &sources.view(), &targets.view(), &mut out)?;
        println!("{metric} ({}x{}):", out.nrows(), out.ncols());
        for row in out.rows() {
            let cells: Vec<String> = row.iter().map(|c| format!("{c:8.3}")).collect();
            println!("  [{}]", cells.join(", "));
        }

        let nearest: Vec<usize> = out
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .min_by(|x, y| x.1.total_cmp(y.1))
                    .map(|(j, _)| j)
                    .unwrap_or(usize::MAX)
            })
            .collect();
        println!("  nearest target per source: {nearest:?}\n");
    }

    // A column mismatch is reported, not silently computed.
    let bad = array![[1.0, 2.0, 3.0]];
    match cost::l2(&sources.view(), &bad.view(), &mut out) {
        Ok(()) => println!("unexpected success"),
        Err(e) => println!("error: {e}"),
    }
    Ok(())
}
