//! Rule-based risk scoring
//!
//! Two independent schemes: the advanced scheme weights its points by the
//! land-use multiplier, the basic scheme sums points on a fixed scale. Both
//! are pure functions of their input.

pub mod advanced;
pub mod basic;

pub use advanced::{classify_weighted, score_advanced};
pub use basic::{area_bonus, classify_basic, score_basic};
