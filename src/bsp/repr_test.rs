use crate::bsp::{PrimitiveKind, BRUSH_PRIMITIVE};
use rstest::rstest;

#[rstest]
#[case::brush(BRUSH_PRIMITIVE, PrimitiveKind::Brush)]
#[case::other(0x40, PrimitiveKind::Other(0x40))]
#[case::max(u8::MAX, PrimitiveKind::Other(u8::MAX))]
fn primitive_kind_tags(#[case] tag: u8, #[case] kind: PrimitiveKind) {
    assert_eq!(PrimitiveKind::from(tag), kind);
    assert_eq!(u8::from(kind), tag);
}
