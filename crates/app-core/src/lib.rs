pub mod constants;
pub mod mic;
pub mod particles;
pub mod pick;
pub mod scene;
pub mod timeline;
pub mod tween;

pub use mic::*;
pub use particles::*;
pub use pick::*;
pub use scene::*;
pub use timeline::*;
pub use tween::*;
