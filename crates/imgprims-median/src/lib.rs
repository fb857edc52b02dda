//! Sliding-window median filter.
//!
//! The reference definition: pad by `size / 2` with reflective borders, take
//! the `size × size` window around every pixel, sort it and keep the middle
//! element. `size` is odd, so there is always exactly one middle element.
//!
//! Two interchangeable implementations produce bit-identical results:
//! - [`MedianMethod::SortedWindow`] follows the definition literally,
//!   `O(pixels · size² log size²)`.
//! - [`MedianMethod::Histogram`] keeps a 256-level count per row and slides
//!   it one column at a time, `O(pixels · size)` amortized.

mod filter;
mod histogram;
mod sorted;

pub use filter::{
    median_filter, median_filter_planar, median_filter_with, MedianMethod, MedianParams,
};
