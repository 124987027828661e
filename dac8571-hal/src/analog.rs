//! Conversion between output voltages and 16-bit codes.

/// The full-scale code.
pub const FULL_SCALE: u16 = u16::MAX;

/// Convert a voltage to the code that produces it, rounding down.
///
/// Returns `None` if `volts` is outside `0.0..=reference` (NaN included) or the
/// reference itself is not positive.
///
/// ```
/// use dac8571_hal::analog::voltage_to_code;
///
/// assert_eq!(voltage_to_code(0.0, 2.5), Some(0));
/// assert_eq!(voltage_to_code(1.25, 2.5), Some(0x7FFF));
/// assert_eq!(voltage_to_code(2.5, 2.5), Some(0xFFFF));
/// assert_eq!(voltage_to_code(-0.1, 2.5), None);
/// ```
pub fn voltage_to_code(volts: f32, reference: f32) -> Option<u16> {
    if reference.is_nan() || reference <= 0.0 || !(0.0..=reference).contains(&volts) {
        return None;
    }
    // Scaled in f64: in f32 the product rounds up across code boundaries.
    // Float to int casts truncate toward zero and saturate.
    let scaled = f64::from(volts) / f64::from(reference) * f64::from(FULL_SCALE);
    Some(scaled as u16)
}

/// The nominal output voltage for a code.
pub fn code_to_voltage(code: u16, reference: f32) -> f32 {
    f32::from(code) / f32::from(FULL_SCALE) * reference
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn endpoints() {
        assert_eq!(voltage_to_code(0.0, 2.5), Some(0));
        assert_eq!(voltage_to_code(2.5, 2.5), Some(FULL_SCALE));
        assert_eq!(code_to_voltage(FULL_SCALE, 2.5), 2.5);
        assert_eq!(code_to_voltage(0, 2.5), 0.0);
    }

    #[test]
    fn truncates_rather_than_rounds() {
        // 1.25 / 2.5 * 65535 = 32767.5
        assert_eq!(voltage_to_code(1.25, 2.5), Some(32767));
        // 2.0 / 2.5 * 65535 = 52428.0
        assert_eq!(voltage_to_code(2.0, 2.5), Some(52428));
    }

    #[test]
    fn just_below_one_lsb_is_code_zero() {
        assert_eq!(voltage_to_code(3.8147555e-5, 2.5), Some(0));
        assert_eq!(voltage_to_code(7.629511e-5, 2.5), Some(1));
    }

    #[test]
    fn rounds_down_just_below_every_code_boundary() {
        for code in 1..=FULL_SCALE {
            let boundary = (f64::from(code) / 65535.0 * 2.5) as f32;
            let below = f32::from_bits(boundary.to_bits() - 1);
            let expected = (f64::from(below) / 2.5 * 65535.0).floor() as u16;
            assert!(expected < code, "{below} V scales to code {code}");
            assert_eq!(voltage_to_code(below, 2.5), Some(expected), "{below} V");
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(voltage_to_code(-2.0, 2.5), None);
        assert_eq!(voltage_to_code(3.3, 2.5), None);
        assert_eq!(voltage_to_code(f32::NAN, 2.5), None);
        assert_eq!(voltage_to_code(f32::INFINITY, 2.5), None);
        assert_eq!(voltage_to_code(0.0, 0.0), None);
        assert_eq!(voltage_to_code(0.0, f32::NAN), None);
    }
}
