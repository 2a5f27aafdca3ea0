// core.rs splits block responsibilities into submodules: header and Merkle
// tree, deterministic genesis construction, and genesis self-checks.
pub mod chain;
pub mod genesis;
pub mod validation;

pub use chain::*;
pub use genesis::*;
pub use validation::*;
