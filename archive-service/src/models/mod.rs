pub mod anomaly;
pub mod post;
pub mod user;

pub use anomaly::{AnomalyObject, AnomalyObjectPatch, NewAnomalyObject, ObjectClass};
pub use post::{NewPost, Post, PostCategory, PostPatch};
pub use user::{SessionUser, User, UserRole};
