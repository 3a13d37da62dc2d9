//! Display filters applied while rendering.

use chrono::NaiveDate;

/// `MM-DD-YYYY`
pub fn mmddyyyy(date: NaiveDate) -> String {
    date.format("%m-%d-%Y").to_string()
}

/// Whole-unit salary with thousands separators; zero reads "Unpaid".
pub fn dollar(value: f64) -> String {
    if value == 0.0 {
        return "Unpaid".to_string();
    }
    let rounded = format!("{:.0}", value.abs());
    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{sign}{}", group_thousands(&rounded))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
