#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use segviz_image as image;

#[doc(inline)]
pub use segviz_region as region;
