const UNITS: [&str; 6] = ["B", "kB", "MB", "GB", "TB", "PB"];

/// Formats a byte length with a base-1024 unit and at most one decimal.
///
/// The unit is the largest one for which the scaled value is at least 1,
/// capped at `PB`. Values are rounded half-to-even and grouped with commas,
/// so `1000` formats as `1,000 B` and `1536` as `1.5 kB`.
pub fn format_size(len: u64) -> String {
    if len == 0 {
        return "0 B".to_string();
    }

    let mut group = 0;
    while group < UNITS.len() - 1 && len >= 1024u64.pow(group as u32 + 1) {
        group += 1;
    }

    let scaled = len as f64 / 1024f64.powi(group as i32);
    let tenths = (scaled * 10.0).round_ties_even() as u64;

    let mut out = group_thousands(tenths / 10);
    let fraction = tenths % 10;
    if fraction != 0 {
        out.push('.');
        out.push(char::from(b'0' + fraction as u8));
    }
    format!("{out} {}", UNITS[group])
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::group_thousands;

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
