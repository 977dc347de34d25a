pub mod bedpe;
pub mod bins;
pub mod cooler;
pub mod dense;
pub mod error;
pub mod io;
pub mod naming;
pub mod ontad;
pub mod pipeline;
pub mod process;
pub mod tad;

/// Formats a float the way the BEDPE and file name tokens expect: shortest
/// round-trip digits, with a trailing `.0` on integral values.
///
/// ```
/// assert_eq!(tad2bedpe::libs::format_float(0.1), "0.1");
/// assert_eq!(tad2bedpe::libs::format_float(1.96), "1.96");
/// assert_eq!(tad2bedpe::libs::format_float(4.0), "4.0");
/// ```
pub fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}
