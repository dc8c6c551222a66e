#![allow(clippy::all)] // Clippy will attempt to remove black_box() internals

use criterion::*;
use gridgen::*;
use hypercube_interp::{DataCube, EngineConfig, InterpolationEngine};

enum Kind {
    Interp,
    Extrap,
}

macro_rules! bench_interp_specific {
    ($group:ident, $ndims:expr, $gridsize:expr, $size:expr, $kind:expr) => {
        $group.throughput(Throughput::Elements(*$size as u64));
        let scan_or_shuffle = "Shuffled Order";

        $group.bench_with_input(
            BenchmarkId::new(
                format!(
                    "Multilinear {}x{}D, {}",
                    $gridsize, $ndims, scan_or_shuffle
                ),
                $size,
            ),
            $size,
            |b, &size| {
                // Interpolation grid with noise
                let (grids, z) = gen_grid($ndims, $gridsize, 1e-3);
                let cube = DataCube::new(vec![$gridsize; $ndims], z).unwrap();
                let engine =
                    InterpolationEngine::new(cube, grids.clone(), EngineConfig::default())
                        .unwrap();

                // Observation grid
                let m: usize = ((size as f64).powf(1.0 / ($ndims as f64)) + 2.0) as usize;
                let gridobs_t = match $kind {
                    Kind::Interp => gen_interp_obs_grid(&grids, m, true),
                    Kind::Extrap => gen_extrap_obs_grid(&grids, m, true),
                };
                let obs: Vec<&[f64]> = gridobs_t.iter().map(|x| &x[..size]).collect();
                let mut out = vec![0.0; size];

                b.iter(|| black_box(engine.interp(&obs, &mut out).unwrap()));
            },
        );

        $group.bench_with_input(
            BenchmarkId::new(
                format!(
                    "Spline Output Axis {}x{}D, {}",
                    $gridsize, $ndims, scan_or_shuffle
                ),
                $size,
            ),
            $size,
            |b, &size| {
                // Interpolation grid with noise
                let (grids, z) = gen_grid($ndims, $gridsize, 1e-3);
                let cube = DataCube::new(vec![$gridsize; $ndims], z).unwrap();
                let engine = InterpolationEngine::builder(cube, grids.clone())
                    .spline($ndims - 1)
                    .build()
                    .unwrap();

                // Observation grid
                let m: usize = ((size as f64).powf(1.0 / ($ndims as f64)) + 2.0) as usize;
                let gridobs_t = match $kind {
                    Kind::Interp => gen_interp_obs_grid(&grids, m, true),
                    Kind::Extrap => gen_extrap_obs_grid(&grids, m, true),
                };
                let obs: Vec<&[f64]> = gridobs_t.iter().map(|x| &x[..size]).collect();
                let mut out = vec![0.0; size];

                b.iter(|| black_box(engine.interp(&obs, &mut out).unwrap()));
            },
        );
    };
}

/// Whole-curve queries, where the cost is dominated by blending rows.
macro_rules! bench_curve_specific {
    ($group:ident, $nparams:expr, $gridsize:expr, $curvesize:expr) => {
        $group.throughput(Throughput::Elements($curvesize as u64));

        $group.bench_function(
            BenchmarkId::new(
                format!("Curve {}x{}D", $gridsize, $nparams),
                $curvesize,
            ),
            |b| {
                let (mut grids, _) = gen_grid($nparams, $gridsize, 1e-3);
                grids.push(hypercube_interp::utils::linspace(0.1, 10.0, $curvesize));
                let mut shape = vec![$gridsize; $nparams];
                shape.push($curvesize);
                let n: usize = shape.iter().product();
                let z = randn::randn::<f64>(&mut randn::rng_fixed_seed(), n);

                let cube = DataCube::new(shape, z).unwrap();
                let engine = InterpolationEngine::builder(cube, grids.clone())
                    .spline($nparams)
                    .build()
                    .unwrap();

                let params: Vec<f64> = grids[..$nparams].iter().map(|g| g[1] + 0.3).collect();
                let pivots = hypercube_interp::utils::linspace(0.5, 9.5, 2 * $curvesize);

                b.iter(|| black_box(engine.interp_pivots(&params, &pivots).unwrap()));
            },
        );
    };
}

fn bench_interp(c: &mut Criterion) {
    for gridsize in [10, 100] {
        let mut group = c.benchmark_group(format!("Interp_2D_Shuffled_{gridsize}-grid"));
        for size in [1, 100, 10_000].iter() {
            bench_interp_specific!(group, 2, gridsize, size, Kind::Interp);
        }
        group.finish();
    }

    for gridsize in [10, 30] {
        let mut group = c.benchmark_group(format!("Interp_3D_Shuffled_{gridsize}-grid"));
        for size in [1, 100, 10_000].iter() {
            bench_interp_specific!(group, 3, gridsize, size, Kind::Interp);
        }
        group.finish();
    }

    let mut group = c.benchmark_group("Interp_5D_Shuffled_6-grid");
    for size in [1, 100, 10_000].iter() {
        bench_interp_specific!(group, 5, 6, size, Kind::Interp);
    }
    group.finish();
}

fn bench_extrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("Extrap_3D_10-grid");
    for size in [1, 100, 10_000].iter() {
        bench_interp_specific!(group, 3, 10, size, Kind::Extrap);
    }
    group.finish();
}

fn bench_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("Curve_Spline");
    bench_curve_specific!(group, 2, 10, 100);
    bench_curve_specific!(group, 2, 10, 1000);
    bench_curve_specific!(group, 4, 6, 100);
    group.finish();
}

criterion_group!(benches_interp, bench_interp);
criterion_group!(benches_extrap, bench_extrap);
criterion_group!(benches_curve, bench_curve);
criterion_main!(benches_interp, benches_extrap, benches_curve,);

mod randn {
    use rand::distr::{Distribution, StandardUniform};
    use rand::rngs::StdRng;
    use rand::Rng;
    use rand::SeedableRng;

    /// Fixed random seed to support repeatable testing
    const SEED: [u8; 32] = [
        0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7,
        6, 5, 4, 3, 2, 1,
    ];

    /// Get a random number generator with a const seed for repeatable testing
    pub fn rng_fixed_seed() -> StdRng {
        StdRng::from_seed(SEED)
    }

    /// Generate `n` random numbers using provided generator
    pub fn randn<T>(rng: &mut StdRng, n: usize) -> Vec<T>
    where
        StandardUniform: Distribution<T>,
    {
        let out: Vec<T> = (0..n).map(|_| rng.random::<T>()).collect();
        out
    }
}

mod gridgen {
    use super::randn::*;
    use hypercube_interp::utils::*;
    use rand::seq::SliceRandom;

    // Generate an irregular grid to interpolate on,
    // and some fake data values.
    pub fn gen_grid(ndims: usize, size: usize, noise: f64) -> (Vec<Vec<f64>>, Vec<f64>) {
        let mut rng = rng_fixed_seed();
        let n = size.pow(ndims as u32);
        let z = randn::<f64>(&mut rng, n);

        let grids: Vec<Vec<f64>> = (0..ndims)
            .map(|_| {
                let mut x = linspace(0.0, 100.0, size);
                if noise > 0.0 {
                    let dx = randn::<f64>(&mut rng, size);
                    (0..size).for_each(|i| x[i] = x[i] + (dx[i] - 0.5) * noise);
                }
                x
            })
            .collect();

        (grids, z)
    }

    // Generate a set of shuffled observation points that are
    // entirely inside the interpolation grid.
    //
    // `size` is the size per grid, so the total number of points will be size.pow(ndims).
    pub fn gen_interp_obs_grid(grids: &[Vec<f64>], size: usize, shuffled: bool) -> Vec<Vec<f64>> {
        let mut rng = rng_fixed_seed();
        let ndims = grids.len();

        let xobs: Vec<Vec<f64>> = (0..ndims)
            .map(|i| linspace(grids[i][1], grids[i][grids[i].len() - 2], size))
            .collect();
        let gridobs = meshgrid((0..ndims).map(|i| &xobs[i]).collect());
        let mut gridobs_t: Vec<Vec<f64>> = (0..ndims)
            .map(|i| gridobs.iter().map(|x| x[i]).collect())
            .collect(); // transpose
        if shuffled {
            (0..ndims).for_each(|i| gridobs_t[i].shuffle(&mut rng));
        }
        gridobs_t
    }

    // Generate a set of observation points that are entirely outside
    // the interpolation grid on every axis, in a corner region.
    pub fn gen_extrap_obs_grid(grids: &[Vec<f64>], size: usize, _shuffled: bool) -> Vec<Vec<f64>> {
        let ndims = grids.len();

        let xobs: Vec<Vec<f64>> = (0..ndims)
            .map(|i| {
                let hi = grids[i][grids[i].len() - 1];
                linspace(hi + 1.0, hi + 2.0, size)
            })
            .collect();
        let gridobs = meshgrid((0..ndims).map(|i| &xobs[i]).collect());
        (0..ndims)
            .map(|i| gridobs.iter().map(|x| x[i]).collect())
            .collect() // transpose
    }
}
