//! Prime Table Benchmark Harness
//! Compares: 6k±1 wheel table vs `primes` crate vs `primal` crate
//!
//! Usage: cargo run --release

use std::fmt;
use std::mem::size_of;
use std::time::{Duration, Instant};

use prime_table::{generate_prime_table, TableCheck, Verifier};

// ─── Configuration ─────────────────────────────────────────────────────────

const TEST_SIZES: [u32; 6] = [10_000, 100_000, 500_000, 1_000_000, 10_000_000, 50_000_000];
const ITERATIONS: usize = 25;

/// The `primes` crate iterator is too slow to be worth timing past this.
const PRIMES_CRATE_MAX: u32 = 1_000_000;

/// Table checks do trial division; only run them up to here.
const VERIFY_MAX: u32 = 1_000_000;

// ─── Implementations under test ────────────────────────────────────────────

fn wheel_table(n: u32) -> prime_table::Result<Vec<u32>> {
    generate_prime_table(n).map(|t| t.into_vec())
}

fn primes_crate_sieve(n: u32) -> prime_table::Result<Vec<u32>> {
    use primes::{PrimeSet, Sieve};
    let mut sieve = Sieve::new();
    Ok(sieve
        .iter()
        .take_while(|&p| p < n as u64)
        .map(|p| p as u32)
        .collect())
}

fn primal_crate_sieve(n: u32) -> prime_table::Result<Vec<u32>> {
    Ok(primal::Primes::all()
        .take_while(|&p| p < n as usize)
        .map(|p| p as u32)
        .collect())
}

fn primal_crate_sieve_direct(n: u32) -> prime_table::Result<Vec<u32>> {
    let sieve = primal::Sieve::new(n as usize);
    Ok(sieve
        .primes_from(0)
        .take_while(|&p| p < n as usize)
        .map(|p| p as u32)
        .collect())
}

// ─── Benchmarking machinery ────────────────────────────────────────────────

struct BenchResult {
    name: &'static str,
    prime_count: usize,
    times: Vec<Duration>,
    sieve_bytes: usize,
    result_bytes: usize,
}

impl BenchResult {
    fn median(&self) -> Duration {
        let mut sorted = self.times.clone();
        sorted.sort();
        sorted.get(sorted.len() / 2).copied().unwrap_or_default()
    }

    fn min(&self) -> Duration {
        self.times.iter().min().copied().unwrap_or_default()
    }
}

impl fmt::Display for BenchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<24} │ {:>12?} │ {:>12?} │ {:>10} KiB │ {:>10} KiB",
            self.name,
            self.min(),
            self.median(),
            self.sieve_bytes / 1024,
            self.result_bytes / 1024,
        )
    }
}

fn bench<F>(
    name: &'static str,
    n: u32,
    sieve_bytes: usize,
    f: F,
) -> prime_table::Result<BenchResult>
where
    F: Fn(u32) -> prime_table::Result<Vec<u32>>,
{
    // Warmup
    f(n)?;
    f(n)?;

    let mut times = Vec::with_capacity(ITERATIONS);
    let mut prime_count = 0;
    let mut result_bytes = 0;

    for _ in 0..ITERATIONS {
        let start = Instant::now();
        let result = f(n)?;
        let elapsed = start.elapsed();
        prime_count = result.len();
        result_bytes = result.capacity() * size_of::<u32>();
        times.push(elapsed);
        std::hint::black_box(&result);
    }

    Ok(BenchResult {
        name,
        prime_count,
        times,
        sieve_bytes,
        result_bytes,
    })
}

fn print_header() {
    println!(
        "{:<24} │ {:>12} │ {:>12} │ {:>14} │ {:>14}",
        "Implementation", "Min", "Median", "Sieve", "Table"
    );
    println!("{}", "─".repeat(88));
}

fn main() -> prime_table::Result<()> {
    println!("🦀 Prime Table Benchmark (6k±1 wheel) 🦀");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    for &n in &TEST_SIZES {
        println!(
            "┌─ n = {} ({} iterations) ─────────────────────────────────────────────────────",
            n, ITERATIONS
        );
        println!("│");

        print_header();

        let wheel_mem = (n as usize).div_ceil(8);
        let wheel = bench("wheel table", n, wheel_mem, wheel_table)?;
        println!("{}", wheel);

        let mut all = vec![wheel];

        if n <= PRIMES_CRATE_MAX {
            let r = bench("primes crate (iter)", n, 0, primes_crate_sieve)?;
            println!("{}", r);
            all.push(r);
        } else {
            println!("{:<24} │ skipped above n = {}", "primes crate (iter)", PRIMES_CRATE_MAX);
        }

        let primal_iter = bench("primal (iterator)", n, 0, primal_crate_sieve)?;
        println!("{}", primal_iter);
        all.push(primal_iter);

        let primal_direct = bench(
            "primal (Sieve::new)",
            n,
            n as usize / 8,
            primal_crate_sieve_direct,
        )?;
        println!("{}", primal_direct);
        all.push(primal_direct);

        // Verify all implementations agree
        let expected = all[0].prime_count;
        for r in &all[1..] {
            assert_eq!(
                expected, r.prime_count,
                "MISMATCH at n={}: wheel={} vs {}={}",
                n, expected, r.name, r.prime_count
            );
        }

        println!("│");
        println!(
            "│  π({}) = {}   │  All implementations agree ✓",
            n - 1,
            expected
        );

        if n <= VERIFY_MAX {
            let table = generate_prime_table(n)?;
            let verdict = if TableCheck.check_table(&table) { "✓" } else { "✗" };
            println!("│  table check: {}", verdict);
        }

        let fastest = all.iter().map(BenchResult::median).min().unwrap_or_default();
        for r in &all {
            let ratio = r.median().as_nanos() as f64 / fastest.as_nanos().max(1) as f64;
            if ratio <= 1.01 {
                println!("│  {:20} : fastest 🏆", r.name);
            } else {
                println!("│  {:20} : {:.2}x slower", r.name, ratio);
            }
        }

        println!("│");
        println!("└──────────────────────────────────────────────────────────────────────────────────");
        println!();
    }

    // Memory comparison
    let n = 10_000_000u32;
    println!("📊 Memory Efficiency @ n={}", n);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let sieve_bytes = (n as usize).div_ceil(8);
    let table = generate_prime_table(n)?;
    let table_bytes = table.len() * size_of::<u32>();
    println!("  sieve bit array:    {:>10} KiB  (dropped before return)", sieve_bytes / 1024);
    println!("  prime table:        {:>10} KiB  (exactly sized)", table_bytes / 1024);
    println!("  naive bool array:   {:>10} KiB  (comparison)", n as usize / 1024);
    println!("  compression ratio:  {:>10.0}x vs naive", n as f64 / sieve_bytes as f64);
    println!();
    println!("✓ Benchmark complete!");
    Ok(())
}
