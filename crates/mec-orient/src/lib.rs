#![deny(missing_docs)]

//! Orientation machinery for partially directed graphs: the four Meek
//! rules applied to fixpoint, and the sink-elimination extension engine
//! that decides whether a PDAG admits a consistent DAG extension.

mod extend;
mod meek;

pub use extend::{extend, is_extendable, ExtendedGraph};
pub use meek::meek_close;
