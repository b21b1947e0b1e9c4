mod model;
mod score;
pub(crate) mod storage;
mod store;

pub(crate) use model::lenient_optional_string;
pub use model::{Badge, FullUser, TempUser, UserKind, UserRef, UserSlot};
pub use score::compute_total_score;
pub use storage::{FileStorage, KeyValueStore};
pub use store::UserStore;
