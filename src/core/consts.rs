use std::ops::RangeInclusive;

/// Labels run from `A` to `Z`, so builders stop at 26 nodes.
pub const MAX_BUILDER_NODES: usize = 26;

pub const PATH_RANDOM_NODES: RangeInclusive<usize> = 5..=26;
pub const FLOW_RANDOM_NODES: RangeInclusive<usize> = 5..=12;

pub const PATH_WEIGHT_RANGE: RangeInclusive<u64> = 5..=99;
pub const FLOW_CAPACITY_RANGE: RangeInclusive<u64> = 5..=20;

/// Node count used when a random quiz is opened without an explicit size.
pub const DEFAULT_RANDOM_NODES: usize = 6;
