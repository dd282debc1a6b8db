//! Collective operations across ranks

/// Sum one counter per rank into a cluster-wide total
///
/// Every rank observes the same result, as with an all-reduce.
pub fn all_reduce_sum<I>(values: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    values.into_iter().sum()
}
