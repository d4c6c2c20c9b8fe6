pub mod common;
pub mod peer;

pub use common::ProtocolError;
pub use peer::{AncestorsRequest, PeerId, PeerService, SummaryStream};
