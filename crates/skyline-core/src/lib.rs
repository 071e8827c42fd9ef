pub mod bands;
pub mod constants;
pub mod driver;
pub mod error;
pub mod mapping;
pub mod overlay;
pub mod playback;
pub mod render;
pub mod scene;
pub mod spectrum;
pub mod surface;

pub use bands::*;
pub use driver::*;
pub use error::*;
pub use mapping::*;
pub use overlay::*;
pub use playback::*;
pub use scene::*;
pub use spectrum::*;
pub use surface::*;
