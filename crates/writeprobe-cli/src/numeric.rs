//! Handle values as typed on a command line.
//!
//! Parsing follows C `strtoul(text, NULL, 0)`: the longest valid numeric
//! prefix is taken and anything unparseable quietly becomes 0.

/// Width of a handle value: the platform's C `unsigned long`.
pub type HandleValue = std::os::raw::c_ulong;

/// Parse `text` as an unsigned integer with automatic radix detection.
///
/// - leading C whitespace is skipped, then an optional `+` or `-`
/// - `0x`/`0X` followed by a hex digit selects base 16
/// - any other leading `0` selects base 8
/// - otherwise base 10
///
/// Out-of-range magnitudes saturate to `HandleValue::MAX`. A `-` sign negates
/// the magnitude modulo 2^width.
pub fn parse_handle_value(text: &str) -> HandleValue {
    let bytes = text.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() && is_c_space(bytes[pos]) {
        pos += 1;
    }

    let negative = match bytes.get(pos) {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let radix: u32 = if bytes.get(pos) == Some(&b'0') {
        let hex_prefix = matches!(bytes.get(pos + 1), Some(b'x' | b'X'))
            && bytes.get(pos + 2).is_some_and(u8::is_ascii_hexdigit);
        if hex_prefix {
            pos += 2;
            16
        } else {
            8
        }
    } else {
        10
    };

    let mut value: HandleValue = 0;
    let mut overflowed = false;
    for &b in &bytes[pos..] {
        let Some(digit) = char::from(b).to_digit(radix) else {
            break;
        };
        match value
            .checked_mul(radix as HandleValue)
            .and_then(|v| v.checked_add(digit as HandleValue))
        {
            Some(next) => value = next,
            None => overflowed = true,
        }
    }

    if overflowed {
        HandleValue::MAX
    } else if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}
