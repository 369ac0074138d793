pub mod buffer;
pub mod io;
pub mod pixel;

pub use self::buffer::PixelBuffer;
pub use self::io::DynamicBuffer;
pub use self::pixel::Pixel;
