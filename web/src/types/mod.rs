//! Response types for the web API that are not part of the move protocol.

mod responses;

pub use responses::*;
