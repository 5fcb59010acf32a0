//! Configuration for sift.
//!
//! - [general]: filters, sort order, idle command and selection marker
//! - [input]: key bindings and run bindings
//! - [assoc]: file association rules
//! - [load]: reading `sift.toml` into [Config], and `--init`

pub mod assoc;
pub mod general;
pub mod input;
pub mod load;

pub use assoc::AssocRule;
pub use general::{General, InternalGeneral};
pub use input::{Keys, RunBinding};
pub use load::Config;
