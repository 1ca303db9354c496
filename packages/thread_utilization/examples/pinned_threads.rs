//! Pins a worker thread to each of two processors, spins on each for a while and prints how much
//! of each processor's busy time the worker consumed.
//!
//! The second worker sleeps briefly before ending its interval, which does not lower its share
//! unless other work runs on the processor meanwhile.
//!
//! Run with: `RUST_LOG=debug cargo run --example pinned_threads`.
#![expect(
    clippy::arithmetic_side_effects,
    reason = "this is example code that does not need production-level safety"
)]

use std::hint::black_box;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use thread_utilization::{CoreId, UtilizationTracker};
use tracing_subscriber::EnvFilter;

const WORKER_PROCESSORS: [CoreId; 2] = [0, 1];
const SPIN_DURATION: Duration = Duration::from_millis(500);

#[cfg(target_os = "linux")]
fn pin_current_thread(core_id: CoreId) -> std::io::Result<()> {
    // SAFETY: All zeroes is a valid cpu_set_t.
    let mut cpuset: libc::cpu_set_t = unsafe { std::mem::zeroed() };

    // SAFETY: The processor index is within the set size for any realistic system.
    unsafe { libc::CPU_SET(core_id as usize, &mut cpuset) };

    // 0 means current thread.
    // SAFETY: No safety requirements beyond passing valid arguments.
    let result =
        unsafe { libc::sched_setaffinity(0, size_of::<libc::cpu_set_t>(), &raw const cpuset) };

    if result == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(target_os = "linux"))]
fn pin_current_thread(_core_id: CoreId) -> std::io::Result<()> {
    Err(std::io::Error::from(std::io::ErrorKind::Unsupported))
}

fn spin(duration: Duration) {
    let start = Instant::now();
    let mut accumulator = 0_u64;

    while start.elapsed() < duration {
        for i in 0..10_000_u64 {
            accumulator = accumulator.wrapping_mul(31).wrapping_add(i);
        }
        black_box(accumulator);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let tracker = Arc::new(UtilizationTracker::new());

    let workers: Vec<_> = WORKER_PROCESSORS
        .into_iter()
        .map(|core_id| {
            let tracker = Arc::clone(&tracker);

            thread::spawn(move || {
                if let Err(e) = pin_current_thread(core_id) {
                    eprintln!("cannot pin worker to processor {core_id}: {e}");
                    return;
                }

                let name = format!("Tester@{core_id}");

                if let Err(e) = tracker.start(name.as_str(), core_id) {
                    eprintln!("cannot start interval {name}: {e}");
                    return;
                }

                spin(SPIN_DURATION);
                thread::sleep(Duration::from_millis(u64::from(core_id) * 10));

                match tracker.end(&name, core_id) {
                    Ok(record) => println!("{record}"),
                    Err(e) => eprintln!("cannot end interval {name}: {e}"),
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().expect("worker thread panicked");
    }

    println!();
    tracker.print_to_stdout();
}
