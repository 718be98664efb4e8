use std::fmt::Debug;

use diol::prelude::*;
use rand::SeedableRng;
use rand_distr::Distribution;
use salesfit::{fit, Sample};

#[derive(Clone)]
struct Arg {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Debug for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arg").field("n", &self.xs.len()).finish()
    }
}

fn main() -> std::io::Result<()> {
    let mut bench = Bench::new(BenchConfig::from_args()?);
    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    let args = [1, 2, 3, 4, 5, 6]
        .iter()
        .map(|len| {
            let n = 10_usize.pow(*len);
            let xs = rand_distr::Normal::new(20.0, 5.0)
                .unwrap()
                .sample_iter(&mut rng)
                .take(n)
                .collect::<Vec<_>>();
            let noise = rand_distr::Normal::new(0.0, 10.0).unwrap();
            let ys = xs
                .iter()
                .map(|x| 4.0 * x + 30.0 + noise.sample(&mut rng))
                .collect::<Vec<_>>();
            Arg { xs, ys }
        })
        .collect::<Vec<_>>();
    bench.register_many(list![fit_sample, predict_range], args);
    bench.run()?;
    Ok(())
}

fn fit_sample(bencher: Bencher, Arg { xs, ys }: Arg) {
    let sample = Sample::new(xs, ys).unwrap();
    bencher.bench(|| {
        fit(&sample).unwrap();
    });
}

fn predict_range(bencher: Bencher, Arg { xs, ys }: Arg) {
    let result = fit(&Sample::new(xs.clone(), ys).unwrap()).unwrap();
    bencher.bench(|| {
        std::hint::black_box(result.fitted_values(&xs));
    });
}
