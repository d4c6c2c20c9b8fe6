/// Structural bounds enforced while synchronizing the DAG with a peer. The
/// hosting process supplies these; there are no file or environment surfaces.
#[derive(Clone, Copy, Debug)]
pub struct SyncParams {
    /// Cap on the received DAG depth below the requested targets, per sync call.
    pub max_possible_depth: u64,

    /// Cap on the growth ratio between adjacent per-rank populations.
    pub max_branching_factor: f64,

    /// Cap on reachability-check hops, also sent to the peer as the requested
    /// ancestor depth.
    pub max_depth_ancestors_request: u64,
}

impl SyncParams {
    pub fn new(max_possible_depth: u64, max_branching_factor: f64, max_depth_ancestors_request: u64) -> Self {
        assert!(max_possible_depth >= 1, "the depth cap must allow at least one level");
        assert!(max_branching_factor >= 1.0, "a branching factor below 1.0 rejects every non-shrinking DAG");
        assert!(max_depth_ancestors_request >= 1, "the ancestor request depth must allow at least one hop");
        Self { max_possible_depth, max_branching_factor, max_depth_ancestors_request }
    }
}
