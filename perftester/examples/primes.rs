//! Perftester Example: Primality Checks
//!
//! Compares three primality tests on the same random inputs, plus a lazy
//! divisor search that is timed until its iterator is exhausted.
//!
//! Run with:
//!   cargo run --example primes

use perftester::prelude::*;
use rand::Rng;
use std::convert::Infallible;

type Check = Result<Outcome<bool, std::iter::Empty<()>>, Infallible>;

fn naive(n: u64) -> Check {
    let prime = n >= 2 && (2..n).all(|d| n % d != 0);
    Ok(Outcome::immediate(prime))
}

fn sqrt_bound(n: u64) -> Check {
    let prime = n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0);
    Ok(Outcome::immediate(prime))
}

fn six_k(n: u64) -> Check {
    if n < 4 {
        return Ok(Outcome::immediate(n >= 2));
    }
    if n % 2 == 0 || n % 3 == 0 {
        return Ok(Outcome::immediate(false));
    }
    let mut k = 5;
    while k * k <= n {
        if n % k == 0 || n % (k + 2) == 0 {
            return Ok(Outcome::immediate(false));
        }
        k += 6;
    }
    Ok(Outcome::immediate(true))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::thread_rng();
    let mut harness = Harness::new(200, move || rng.gen_range(100_000u64..1_000_000));

    harness
        .add_function("", naive, |n: &u64| *n)?
        .add_function("", sqrt_bound, |n: &u64| *n)?
        .add_function("", six_k, |n: &u64| *n)?
        // Input as text, parsed inside the timed call
        .add_function(
            "six_k_str",
            |s: String| six_k(s.parse().unwrap_or(0)),
            |n: &u64| n.to_string(),
        )?
        .add_function(
            "divisors",
            |n: u64| {
                let divisors = (2..)
                    .take_while(move |d| d * d <= n)
                    .filter(move |d| n % d == 0);
                Ok::<_, Infallible>(Outcome::lazy(divisors))
            },
            |n: &u64| *n,
        )?;

    let collection = harness.compare_performance()?;

    // Same samples, with a tail-latency column
    let mut detailed = StatsCollection::new();
    detailed.register_metric(Metric::percentile("p95", 95.0, Some("s")));
    harness.collect_into(&mut detailed);
    println!();
    print_table(&detailed.table_rows(), &Separator::default())?;

    if let Some(stats) = collection.get("six_k") {
        println!("\nsix_k: {stats}");
    }
    Ok(())
}
