pub mod collection;
pub mod favorite;
pub mod video;

pub use collection::*;
pub use favorite::*;
pub use video::*;
