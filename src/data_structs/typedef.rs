/// 0-based position on the reference transcript.
pub type PosType = u32;
/// Number of reads contributing to a statistic.
pub type CountType = u32;
/// Modification probability, in `[0, 1]`.
pub type ProbType = f64;
