use bytebuf::{BufferError, BufferView, Endian, IntSpec, IntWidth};

const WIDTHS: [IntWidth; 4] = [IntWidth::W8, IntWidth::W16, IntWidth::W32, IntWidth::W64];

#[test]
fn test_one_past_each_limit_is_rejected() {
    let view = BufferView::alloc(8).unwrap();

    for width in WIDTHS {
        for signed in [false, true] {
            let spec = IntSpec::new(width, signed, Endian::Big);
            let (min, max) = spec.range();

            assert_eq!(view.write_int(max, 0, spec).unwrap(), width.bytes());
            assert_eq!(view.read_int(0, spec).unwrap(), max);
            assert_eq!(view.write_int(min, 0, spec).unwrap(), width.bytes());
            assert_eq!(view.read_int(0, spec).unwrap(), min);

            assert_eq!(
                view.write_int(max + 1, 0, spec).unwrap_err(),
                BufferError::ValueOutOfRange {
                    value: max + 1,
                    min,
                    max
                }
            );
            assert!(matches!(
                view.write_int(min - 1, 0, spec),
                Err(BufferError::ValueOutOfRange { .. })
            ));
        }
    }
}

#[test]
fn test_documented_boundaries() {
    let view = BufferView::alloc(1).unwrap();

    assert!(view
        .write_int(256, 0, IntSpec::unsigned(IntWidth::W8, Endian::Big))
        .is_err());
    assert!(view
        .write_int(-129, 0, IntSpec::signed(IntWidth::W8, Endian::Big))
        .is_err());
    assert!(view
        .write_int(-1, 0, IntSpec::unsigned(IntWidth::W8, Endian::Big))
        .is_err());

    // A rejected write leaves the view untouched
    assert_eq!(view, [0]);
}

#[test]
fn test_out_of_bounds() {
    let view = BufferView::alloc(3).unwrap();
    let spec = IntSpec::unsigned(IntWidth::W16, Endian::Little);

    assert!(view.read_int(1, spec).is_ok());
    assert_eq!(
        view.read_int(2, spec).unwrap_err(),
        BufferError::OutOfBounds {
            offset: 2,
            len: 2,
            bound: 3,
        }
    );
    assert!(matches!(
        view.write_int(1, 2, spec),
        Err(BufferError::OutOfBounds { .. })
    ));
}

#[test]
fn test_out_of_bounds_wins_over_range() {
    let view = BufferView::alloc(1).unwrap();
    assert!(matches!(
        view.write_int(1 << 20, 0, IntSpec::unsigned(IntWidth::W16, Endian::Big)),
        Err(BufferError::OutOfBounds { .. })
    ));
}

#[test]
fn test_reads_respect_view_offset() {
    let whole = BufferView::from_vec(vec![0xAA, 0x12, 0x34, 0x56, 0x78]).unwrap();
    let tail = whole.slice(1, 5);

    assert_eq!(tail.read_u32(0, Endian::Big).unwrap(), 0x1234_5678);
    assert_eq!(tail.read_u32(0, Endian::Little).unwrap(), 0x7856_3412);
    assert_eq!(
        tail.read_int(0, IntSpec::unsigned(IntWidth::W16, Endian::Big))
            .unwrap(),
        0x1234
    );

    tail.write_u16(0xBEEF, 2, Endian::Big).unwrap();
    assert_eq!(whole, [0xAA, 0x12, 0x34, 0xBE, 0xEF]);
}

#[test]
fn test_typed_accessors() {
    let view = BufferView::alloc(16).unwrap();

    assert_eq!(view.write_i8(-1, 0).unwrap(), 1);
    assert_eq!(view.read_u8(0).unwrap(), 0xFF);
    assert_eq!(view.read_i8(0).unwrap(), -1);

    assert_eq!(view.write_i16(-2, 0, Endian::Little).unwrap(), 2);
    assert_eq!(view.read_i16(0, Endian::Little).unwrap(), -2);

    assert_eq!(view.write_i64(i64::MIN, 8, Endian::Big).unwrap(), 16);
    assert_eq!(view.read_i64(8, Endian::Big).unwrap(), i64::MIN);
    assert_eq!(view.read_u8(8).unwrap(), 0x80);

    view.write_u64(u64::MAX - 1, 0, Endian::Little).unwrap();
    assert_eq!(view.read_u64(0, Endian::Little).unwrap(), u64::MAX - 1);

    view.write_i32(-70_000, 4, Endian::Big).unwrap();
    assert_eq!(view.read_i32(4, Endian::Big).unwrap(), -70_000);

    assert!(view.read_u8(16).is_err());
    assert!(view.read_u64(9, Endian::Big).is_err());
    assert!(view.write_u32(1, 13, Endian::Big).is_err());
}

#[test]
fn test_floats() {
    let view = BufferView::alloc(12).unwrap();

    view.write_f32(1.5, 0, Endian::Big).unwrap();
    assert_eq!(view.slice(0, 4), [0x3F, 0xC0, 0, 0]);
    assert_eq!(view.read_f32(0, Endian::Big).unwrap(), 1.5);

    view.write_f64(-0.25, 4, Endian::Little).unwrap();
    assert_eq!(view.read_f64(4, Endian::Little).unwrap(), -0.25);

    assert!(view.write_f64(1.0, 5, Endian::Big).is_err());
}
