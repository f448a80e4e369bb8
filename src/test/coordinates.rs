use crate::Error;
use crate::coord::{Coordinate, CoordinateSpace, DigitOrder, coordinate_to_index, index_to_coordinate};

fn space() -> CoordinateSpace {
    CoordinateSpace::new(2, vec![4, 3]).expect("valid space")
}

#[test]
fn coordinate_space_counts_terms_and_radices() {
    let s = space();
    assert_eq!(s.terms(), 24);
    assert_eq!(s.radices().collect::<Vec<_>>(), vec![2, 4, 3]);
}

#[test]
fn coordinate_space_rejects_bad_widths_and_concentration() {
    assert!(matches!(
        CoordinateSpace::new(0, vec![4]),
        Err(Error::OutOfBounds { name: "concentration", .. })
    ));
    assert!(matches!(
        CoordinateSpace::new(2, vec![4, 1]),
        Err(Error::OutOfBounds { name: "width", value: 1, .. })
    ));
    assert!(matches!(
        CoordinateSpace::new(1 << 40, vec![1 << 30]),
        Err(Error::Overflow(_))
    ));
}

#[test]
fn index_to_coordinate_little_endian() {
    let c = index_to_coordinate(&space(), 5, 0, DigitOrder::LittleEndian).expect("in range");
    assert_eq!(c.local, 1);
    assert_eq!(c.dims, vec![2, 0]);
    assert_eq!(c.to_string(), "1-2,0");
}

#[test]
fn index_to_coordinate_big_endian_reverses_dimensions_only() {
    let c = index_to_coordinate(&space(), 23, 0, DigitOrder::BigEndian).expect("in range");
    assert_eq!(c.local, 1);
    assert_eq!(c.dims, vec![3, 2]);
    assert_eq!(c.to_string(), "2,3-1");
}

#[test]
fn offsets_wrap_cyclically_in_both_directions() {
    let s = space();
    // (5 - 23) mod 24 = 6
    let c = index_to_coordinate(&s, 5, -23, DigitOrder::LittleEndian).expect("in range");
    assert_eq!(coordinate_to_index(&s, &c).expect("valid digits"), 6);
    assert_eq!(c.to_string(), "0-3,0");

    // (5 + 23) mod 24 = 4
    let c = index_to_coordinate(&s, 5, 23, DigitOrder::LittleEndian).expect("in range");
    assert_eq!(coordinate_to_index(&s, &c).expect("valid digits"), 4);

    assert_eq!(s.wrap(0, -23).expect("in range"), 1);
    assert_eq!(s.wrap(23, 23).expect("in range"), 22);
}

#[test]
fn out_of_range_index_and_offset_are_rejected() {
    let s = space();
    assert!(matches!(
        index_to_coordinate(&s, 24, 0, DigitOrder::LittleEndian),
        Err(Error::IndexOutOfRange { index: 24, terms: 24 })
    ));
    for offset in [24, -24, i64::MIN, i64::MAX] {
        assert!(matches!(
            index_to_coordinate(&s, 0, offset, DigitOrder::BigEndian),
            Err(Error::OffsetOutOfRange { .. })
        ));
    }
}

#[test]
fn coordinate_round_trip_recovers_wrapped_index() {
    let s = CoordinateSpace::new(3, vec![2, 5, 4]).expect("valid space");
    let terms = s.terms() as i64;
    for offset in [-(terms - 1), -7, 0, 1, terms - 1] {
        for index in 0..s.terms() {
            for order in [DigitOrder::LittleEndian, DigitOrder::BigEndian] {
                let c = index_to_coordinate(&s, index, offset, order).expect("in range");
                let back = coordinate_to_index(&s, &c).expect("valid digits");
                let expected = (index as i64 + offset).rem_euclid(terms) as u64;
                assert_eq!(back, expected, "index={index} offset={offset}");
            }
        }
    }
}

#[test]
fn coordinate_to_index_validates_digits() {
    let s = space();
    let bad_digit = Coordinate {
        local: 0,
        dims: vec![4, 0],
        order: DigitOrder::LittleEndian,
    };
    assert!(matches!(
        coordinate_to_index(&s, &bad_digit),
        Err(Error::DigitOutOfRange { position: 1, digit: 4, radix: 4 })
    ));

    let short = Coordinate {
        local: 0,
        dims: vec![1],
        order: DigitOrder::LittleEndian,
    };
    assert!(matches!(
        coordinate_to_index(&s, &short),
        Err(Error::Malformed { .. })
    ));
}
