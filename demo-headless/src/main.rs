use std::hint::black_box;
use std::process::ExitCode;

use clap::Parser;
use nalgebra::Vector3;
use packed_vec3_core::batch::normalize_in_place;
use packed_vec3_core::{
    length, log_backend, max, min, normalize, normalize_exact, normalize_with,
    refined_error_bound, NativeRsqrt, ProfilerScope, SoftwareRsqrt, Stopwatch, Vec3Packed,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Packed vector benchmark with configurable workload
#[derive(Parser, Debug)]
#[command(name = "demo-headless")]
#[command(about = "Packed 3D vector micro-benchmark and precision check", long_about = None)]
struct Args {
    /// Number of random vectors per pass
    #[arg(short, long, default_value_t = 100_000)]
    count: usize,

    /// Timed passes per operation (best and mean are reported)
    #[arg(short, long, default_value_t = 20)]
    iterations: u32,

    /// Seed for the vector generator
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Lanes are drawn from [-range, range)
    #[arg(short, long, default_value_t = 100.0)]
    range: f32,

    /// Check normalize precision against the exact path
    #[arg(short, long)]
    validate: bool,

    /// Also time the rayon batch normalize
    #[arg(short, long)]
    parallel: bool,
}

impl Args {
    fn check(&self) -> Result<(), String> {
        if self.count == 0 {
            return Err("--count must be at least 1".to_string());
        }
        if self.iterations == 0 {
            return Err("--iterations must be at least 1".to_string());
        }
        if !self.range.is_finite() || self.range <= 0.0 {
            return Err(format!("--range must be finite and positive, got {}", self.range));
        }
        Ok(())
    }
}

/// Best and mean wall time of one operation.
struct Timing {
    name: &'static str,
    best_ms: f64,
    mean_ms: f64,
}

impl Timing {
    fn ns_per_vector(&self, count: usize) -> f64 {
        self.best_ms * 1.0e6 / count as f64
    }
}

fn time_op<R>(name: &'static str, iterations: u32, mut op: impl FnMut() -> R) -> Timing {
    let mut stopwatch = Stopwatch::new();
    let mut best_ms = f64::INFINITY;
    let mut total_ms = 0.0;
    for _ in 0..iterations {
        stopwatch.reset();
        black_box(op());
        let elapsed = stopwatch.read();
        best_ms = best_ms.min(elapsed);
        total_ms += elapsed;
    }
    Timing {
        name,
        best_ms,
        mean_ms: total_ms / f64::from(iterations),
    }
}

fn random_vectors(count: usize, range: f32, seed: u64) -> Vec<Vec3Packed> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Vec3Packed::new(
                rng.random_range(-range..range),
                rng.random_range(-range..range),
                rng.random_range(-range..range),
            )
        })
        .collect()
}

fn run_benchmarks(args: &Args, vectors: &[Vec3Packed]) -> Vec<Timing> {
    let direction = normalize_exact(Vec3Packed::new(1.0, 2.0, 3.0));
    let nalgebra_vectors: Vec<Vector3<f32>> = vectors.iter().map(|&v| v.into()).collect();
    let mut scratch = vectors.to_vec();

    let mut timings = vec![
        time_op("normalize (rsqrt + 1 NR)", args.iterations, || {
            vectors.iter().fold(Vec3Packed::ZERO, |acc, &v| acc + normalize(v))
        }),
        time_op("normalize (software seed)", args.iterations, || {
            vectors
                .iter()
                .fold(Vec3Packed::ZERO, |acc, &v| acc + normalize_with::<SoftwareRsqrt>(v))
        }),
        time_op("normalize (exact)", args.iterations, || {
            vectors.iter().fold(Vec3Packed::ZERO, |acc, &v| acc + normalize_exact(v))
        }),
        time_op("nalgebra normalize", args.iterations, || {
            nalgebra_vectors
                .iter()
                .fold(Vector3::zeros(), |acc: Vector3<f32>, v| acc + v.normalize())
        }),
        time_op("dot", args.iterations, || {
            vectors.iter().fold(0.0f32, |acc, &v| acc + v * direction)
        }),
        time_op("cross", args.iterations, || {
            vectors.iter().fold(Vec3Packed::ZERO, |acc, &v| acc + (v ^ direction))
        }),
        time_op("min/max", args.iterations, || {
            vectors
                .iter()
                .fold((vectors[0], vectors[0]), |(lo, hi), &v| (min(lo, v), max(hi, v)))
        }),
    ];

    if args.parallel {
        info!(threads = rayon::current_num_threads(), "Timing batch normalize");
        timings.push(time_op("batch normalize", args.iterations, || {
            scratch.copy_from_slice(vectors);
            normalize_in_place(&mut scratch);
        }));
    }

    timings
}

/// Worst observed errors of the fast path.
struct PrecisionReport {
    worst_length_error: f32,
    worst_lane_error: f32,
    skipped: usize,
}

fn check_precision(vectors: &[Vec3Packed]) -> PrecisionReport {
    let mut report = PrecisionReport {
        worst_length_error: 0.0,
        worst_lane_error: 0.0,
        skipped: 0,
    };
    for &v in vectors {
        // Near-zero input is the documented unguarded edge case.
        if length(v) < 1.0e-3 {
            report.skipped += 1;
            continue;
        }
        let fast = normalize(v);
        let exact = normalize_exact(v);
        report.worst_length_error = report.worst_length_error.max((length(fast) - 1.0).abs());
        for lane in 0..3 {
            report.worst_lane_error = report.worst_lane_error.max((fast[lane] - exact[lane]).abs());
        }
    }
    report
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if let Err(message) = args.check() {
        error!("{message}");
        return ExitCode::from(2);
    }

    let _run_scope = ProfilerScope::new("benchmark run");

    println!("=== Packed Vec3 Benchmark ===\n");
    let backend = log_backend();
    println!("Backend: {backend}");
    println!(
        "Vectors: {}  Iterations: {}  Seed: {}  Range: ±{}\n",
        args.count, args.iterations, args.seed, args.range
    );

    let vectors = random_vectors(args.count, args.range, args.seed);
    let timings = run_benchmarks(&args, &vectors);

    println!("{:<28} {:>12} {:>12} {:>12}", "operation", "best ms", "mean ms", "ns/vector");
    for timing in &timings {
        println!(
            "{:<28} {:>12.3} {:>12.3} {:>12.2}",
            timing.name,
            timing.best_ms,
            timing.mean_ms,
            timing.ns_per_vector(args.count)
        );
    }

    if !args.validate {
        return ExitCode::SUCCESS;
    }

    // Refinement bound plus rounding of the final multiply and of `length`.
    let tolerance = refined_error_bound::<NativeRsqrt>() + 4.0 * f32::EPSILON;
    let report = check_precision(&vectors);
    println!("\n=== Precision ===");
    println!("worst |length(normalize(v)) - 1|: {:.3e}", report.worst_length_error);
    println!("worst lane error vs exact:        {:.3e}", report.worst_lane_error);
    println!("tolerance:                        {tolerance:.3e}");
    if report.skipped > 0 {
        warn!(skipped = report.skipped, "Skipped near-zero vectors in precision check");
    }

    if report.worst_length_error <= tolerance {
        println!("PASS");
        ExitCode::SUCCESS
    } else {
        error!(
            worst = report.worst_length_error,
            tolerance, "normalize exceeded its error bound"
        );
        println!("FAIL");
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(count: usize, iterations: u32, range: f32) -> Args {
        Args {
            count,
            iterations,
            seed: 1,
            range,
            validate: true,
            parallel: false,
        }
    }

    #[test]
    fn test_command_name_matches_binary() {
        use clap::CommandFactory;
        assert_eq!(Args::command().get_name(), env!("CARGO_BIN_NAME"));
    }

    #[test]
    fn test_args_check_rejects_empty_workload() {
        assert!(args(0, 1, 1.0).check().is_err());
        assert!(args(1, 0, 1.0).check().is_err());
        assert!(args(1, 1, f32::NAN).check().is_err());
        assert!(args(1, 1, -1.0).check().is_err());
        assert!(args(10, 1, 1.0).check().is_ok());
    }

    #[test]
    fn test_random_vectors_are_reproducible() {
        let first = random_vectors(16, 5.0, 7);
        assert_eq!(first, random_vectors(16, 5.0, 7));
        assert!(random_vectors(64, 5.0, 7)
            .iter()
            .all(|v| v.w == 0.0 && v.x.abs() <= 5.0));
    }

    #[test]
    fn test_precision_report_within_tolerance() {
        let vectors = random_vectors(2_000, 100.0, 3);
        let report = check_precision(&vectors);
        let tolerance = refined_error_bound::<NativeRsqrt>() + 4.0 * f32::EPSILON;
        assert!(report.worst_length_error <= tolerance);
        assert!(report.worst_lane_error < 1.0e-5);
    }

    #[test]
    fn test_benchmarks_run_every_operation() {
        let mut a = args(32, 2, 10.0);
        a.parallel = true;
        let vectors = random_vectors(a.count, a.range, a.seed);
        let timings = run_benchmarks(&a, &vectors);
        assert_eq!(timings.len(), 8);
        assert!(timings.iter().all(|t| t.best_ms >= 0.0 && t.mean_ms >= t.best_ms));
    }
}
