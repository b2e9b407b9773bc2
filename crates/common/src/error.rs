use thiserror::Error;

/// Failure taxonomy shared by the core and its callers.
///
/// Two expected outcomes are deliberately *not* here: a missing rate cell
/// (it simply produces no edge) and the absence of arbitrage (reported as
/// `Outcome::NoArbitrage`, never through the error path).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A rate cell is zero, negative, or non-finite. Such a rate has no
    /// logarithm and must never reach the solver as an edge weight.
    #[error("invalid rate {rate} for {from}->{to}")]
    InvalidRate {
        from: String,
        to: String,
        rate: f64,
    },

    /// A requested seed or source currency is not a vertex of the graph.
    /// Fails that seed's run only.
    #[error("currency {0} is not present in the rate graph")]
    NodeNotFound(String),

    /// A targeted sweep was started with no seeds at all.
    #[error("targeted sweep requires at least one seed")]
    EmptySeedList,

    /// A cycle references an edge the graph does not contain, usually a
    /// sign the cycle was built against a different graph.
    #[error("cycle references missing edge {from}->{to}")]
    MissingEdge { from: String, to: String },

    /// The sweep observed its cancel token and stopped early.
    #[error("sweep cancelled by caller")]
    Cancelled,
}
