pub mod factory;
pub mod paths;
pub mod runtime;

pub use factory::build_object_store;
pub use paths::{join_key, normalize_prefix, object_key, strip_leading_slash};
pub use runtime::run_blocking;
