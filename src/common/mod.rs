use crate::error::WriteAttempt;
use std::io;
use std::string::String;

pub trait Writes<W: io::Write> {
    fn write_to(&self, writer: &mut W) -> WriteAttempt;
}

/// Render a number rounded to 2 decimal places, dropping the decimal point
/// entirely when the rounded value is integral
pub fn format_float(number: f64) -> String {
    if !number.is_finite() {
        return format!("{}", number);
    }

    // `{:.2}` rounds on the exact binary value, so 2.345 becomes 2.35
    let rounded: f64 = match format!("{:.2}", number).parse() {
        Ok(rounded) => rounded,
        Err(_) => number,
    };

    if rounded == 0.0 {
        String::from("0")
    } else {
        format!("{}", rounded)
    }
}
