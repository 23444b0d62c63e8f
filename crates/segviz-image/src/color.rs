/// An 8-bit RGB color.
///
/// Unpacks from the 24-bit packed form `0x00RRGGBB`. The top byte of a
/// packed value is ignored when unpacking.
///
/// # Examples
///
/// ```
/// use segviz_image::Rgb8;
///
/// let color = Rgb8::from_packed(0xff12_3456);
/// assert_eq!(color, Rgb8([0x12, 0x34, 0x56]));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8(pub [u8; 3]);

impl Rgb8 {
    /// Unpack a `0x00RRGGBB` value.
    pub fn from_packed(rgb: u32) -> Self {
        Self([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8])
    }

    /// A gray color with all three channels set to `value`.
    pub fn gray(value: u8) -> Self {
        Self([value; 3])
    }
}
