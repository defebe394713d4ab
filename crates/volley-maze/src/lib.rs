//! Deterministic maze generation, grid queries, and pathfinding.
//!
//! The arena floor is a seeded wide-corridor maze. This crate owns the
//! three concerns around it:
//!
//! - [`generate`]: the seeded generator. A string seed is hashed with
//!   FNV-1a into a ChaCha8 RNG, so `(width, height, seed)` fully
//!   determines the layout.
//! - [`grid`]: the immutable [`Maze`] and its spatial queries
//!   (walkability, neighbours, corridors, line of sight).
//! - [`path`]: depth-capped BFS routing with ring-search retargeting
//!   and a greedy fallback, shaped for per-decision-tick replanning.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod generate;
pub mod grid;
pub mod path;

pub use generate::{hash_seed, MazeError, MazeGenerator, MIN_DIMENSION, OPEN_TARGET_FRACTION};
pub use grid::{Cell, Maze};
pub use path::{first_step_towards, nearest_walkable, shortest_path, PathLimits};
