//! Host-side checks of the formatting pipeline: numbers, floats, and text
//! are decoded back from the produced segment patterns.

use sevseg4::{BitMatrix, CELL_COUNT, Error, MAX_VALUE};

/// Digit glyphs, LSB-first segment order (bit 0 = a .. bit 6 = g).
const DIGIT_GLYPHS: [u8; 10] = [
    0b_0011_1111,
    0b_0000_0110,
    0b_0101_1011,
    0b_0100_1111,
    0b_0110_0110,
    0b_0110_1101,
    0b_0111_1101,
    0b_0000_0111,
    0b_0111_1111,
    0b_0110_1111,
];
const DECIMAL: u8 = 0b_1000_0000;
const MINUS: u8 = 0b_0100_0000;

/// Decodes a matrix back to `(value, dp_position)`, treating blank cells
/// as suppressed zeros.
fn decode(matrix: &BitMatrix) -> (u16, i8) {
    let mut value: u16 = 0;
    let mut dp_position: i8 = -1;
    for (index, &bits) in matrix.iter().enumerate() {
        if bits & DECIMAL != 0 {
            assert_eq!(dp_position, -1, "more than one decimal point lit");
            dp_position = i8::try_from(index).expect("index fits");
        }
        let glyph = bits & !DECIMAL;
        let digit = if glyph == 0 {
            0
        } else {
            DIGIT_GLYPHS
                .iter()
                .position(|&candidate| candidate == glyph)
                .unwrap_or_else(|| panic!("cell {index} is not a digit glyph: {glyph:#010b}"))
        };
        value = value * 10 + u16::try_from(digit).expect("digit fits");
    }
    (value, dp_position)
}

#[test]
fn number_round_trips_for_all_values_and_positions() {
    for value in 0..=MAX_VALUE {
        for dp_position in [-1, 0, 1, 2, 3] {
            let matrix = BitMatrix::from_number(value, dp_position, true);
            assert_eq!(
                decode(&matrix),
                (value, dp_position),
                "value {value} dp {dp_position}"
            );
        }
    }
}

#[test]
fn out_of_range_decimal_position_normalizes_to_none() {
    for dp_position in [-128, -2, 4, 17, 127] {
        let matrix = BitMatrix::from_number(42, dp_position, true);
        assert_eq!(decode(&matrix), (42, -1), "dp {dp_position}");
    }
}

#[test]
fn values_above_the_display_range_clamp() {
    let matrix = BitMatrix::from_number(u16::MAX, -1, false);
    assert_eq!(decode(&matrix), (MAX_VALUE, -1));
}

#[test]
fn leading_zero_suppression_renders_blanks() {
    let suppressed = BitMatrix::from_number(7, -1, true);
    let cells: Vec<u8> = suppressed.iter().copied().collect();
    assert_eq!(cells, [0, 0, 0, DIGIT_GLYPHS[7]], "\"   7\"");

    let padded = BitMatrix::from_number(7, -1, false);
    let cells: Vec<u8> = padded.iter().copied().collect();
    assert_eq!(
        cells,
        [
            DIGIT_GLYPHS[0],
            DIGIT_GLYPHS[0],
            DIGIT_GLYPHS[0],
            DIGIT_GLYPHS[7]
        ],
        "\"0007\""
    );
}

#[test]
fn float_with_two_integer_digits_gets_two_decimals() {
    let matrix = BitMatrix::from_float(56.78, true).expect("finite");
    assert_eq!(decode(&matrix), (5678, 1), "\"56.78\"");
}

#[test]
fn float_with_four_integer_digits_has_no_point() {
    let matrix = BitMatrix::from_float(1234.5, true).expect("finite");
    assert_eq!(decode(&matrix), (1235, -1), "rounded half away from zero");
}

#[test]
fn float_rounds_half_away_from_zero_at_the_chosen_scale() {
    let matrix = BitMatrix::from_float(1.2345, true).expect("finite");
    assert_eq!(decode(&matrix), (1235, 0), "\"1.235\"");

    let matrix = BitMatrix::from_float(999.95, true).expect("finite");
    assert_eq!(decode(&matrix), (9999, 2), "\"999.9\" after clamping");
}

#[test]
fn negative_float_reserves_the_leftmost_digit_for_the_sign() {
    // -5.5 -> "-5.50": two decimals below magnitude 10.
    let matrix = BitMatrix::from_float(-5.5, true).expect("finite");
    assert_eq!(matrix[0], MINUS);
    assert_eq!(matrix[1], DIGIT_GLYPHS[5] | DECIMAL);
    assert_eq!(matrix[2], DIGIT_GLYPHS[5]);
    assert_eq!(matrix[3], DIGIT_GLYPHS[0]);

    // -45.67 -> "-45.7": one decimal from magnitude 10 up.
    let matrix = BitMatrix::from_float(-45.67, true).expect("finite");
    assert_eq!(matrix[0], MINUS);
    assert_eq!(matrix[1], DIGIT_GLYPHS[4]);
    assert_eq!(matrix[2], DIGIT_GLYPHS[5] | DECIMAL);
    assert_eq!(matrix[3], DIGIT_GLYPHS[7]);
}

#[test]
fn negative_float_out_of_range_shows_the_fixed_token() {
    let expected = BitMatrix::from_chars(&['-', '9', '9', '9']);
    for value in [-100.0, -100.01, -9999.0] {
        assert_eq!(
            BitMatrix::from_float(value, true).expect("finite"),
            expected,
            "{value}"
        );
    }
}

#[test]
fn non_finite_floats_are_rejected() {
    for value in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
        assert!(matches!(
            BitMatrix::from_float(value, true),
            Err(Error::InvalidArgument)
        ));
    }
}

#[test]
fn text_maps_each_character_through_the_encoder() {
    let matrix = BitMatrix::from_text("GOOD").expect("four chars fit");
    let expected = BitMatrix::from_chars(&['G', 'O', 'O', 'D']);
    assert_eq!(matrix, expected);
}

#[test]
fn text_folds_lowercase_and_pads_right() {
    assert_eq!(
        BitMatrix::from_text("good").expect("fits"),
        BitMatrix::from_text("GOOD").expect("fits")
    );
    assert_eq!(
        BitMatrix::from_text("no").expect("fits"),
        BitMatrix::from_chars(&['n', 'o', ' ', ' '])
    );
    assert!(BitMatrix::from_text("").expect("fits").is_blank());
}

#[test]
fn oversized_text_is_rejected() {
    assert!(matches!(
        BitMatrix::from_text("TOOLONG"),
        Err(Error::InvalidArgument)
    ));
}

#[test]
fn blanking_is_idempotent() {
    let once = BitMatrix::default();
    let twice = BitMatrix::default();
    assert_eq!(once, twice);
    assert!(once.is_blank());
    assert_eq!(once, BitMatrix::new([0; CELL_COUNT]));
}

#[test]
fn raw_segment_masks_pass_through_verbatim() {
    let patterns = [0b_1010_1010, 0, 0b_0000_0001, 0b_1111_1111];
    let matrix = BitMatrix::new(patterns);
    for (index, &expected) in patterns.iter().enumerate() {
        assert_eq!(matrix[index], expected);
    }
}
