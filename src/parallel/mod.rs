//! Sequential vs parallel execution of per-row work.
//!
//! This module only manages system resources and execution strategy. It knows
//! nothing about listings or skills: callers decide how many rows justify
//! going parallel and pass a plain `Fn(T) -> R`.
//!
//! ```rust
//! use jobscope::parallel::ExecutionStrategy;
//!
//! let workers = ExecutionStrategy::calculate_optimal_workers(0, 75);
//! let strategy = ExecutionStrategy::auto(5_000, 1_000, workers);
//! let doubled = strategy.execute(vec![1, 2, 3], |x| x * 2, None::<fn(usize, usize)>).unwrap();
//! assert_eq!(doubled, vec![2, 4, 6]);
//! ```

pub mod core;

pub use self::core::{ExecutionMode, ExecutionStrategy};
