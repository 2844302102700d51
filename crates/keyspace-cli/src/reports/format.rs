use std::fmt::Display;

/// Decimal rendering with a comma every three digits.
pub fn group_thousands<T: Display>(value: &T) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyspace_core::BigUint;
    use std::str::FromStr;

    #[test]
    fn test_grouping() {
        assert_eq!(group_thousands(&0u32), "0");
        assert_eq!(group_thousands(&999u32), "999");
        assert_eq!(group_thousands(&1000u32), "1,000");
        assert_eq!(group_thousands(&30336792u64), "30,336,792");
        let big = BigUint::from_str("2512677383802").unwrap();
        assert_eq!(group_thousands(&big), "2,512,677,383,802");
    }
}
