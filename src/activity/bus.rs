use std::str::FromStr;

/// Result of parsing a bus-annotated net name such as `data[7:0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusName {
    /// Net name with the subscript removed.
    pub base: String,
    /// First declared bit index (unswapped; may exceed `to`).
    pub from: i32,
    /// Last declared bit index.
    pub to: i32,
    /// Whether the subscript was a `from:to` range rather than a single bit.
    pub is_range: bool,
    /// Whether the subscript was the wildcard `*`.
    pub subscript_wild: bool,
}

/// Parses `base[from:to]`, `base[bit]`, or `base[*]` using the given bracket
/// pair. A bracket preceded by `escape` is part of the name, not a subscript
/// delimiter. Returns `None` when the name carries no parsable subscript.
pub fn parse_bus_name(name: &str, open: char, close: char, escape: char) -> Option<BusName> {
    let stripped = name.strip_suffix(close)?;
    if stripped.ends_with(escape) {
        return None;
    }
    let open_at = find_unescaped(stripped, open, escape)?;
    let base = &stripped[..open_at];
    let subscript = &stripped[open_at + open.len_utf8()..];
    if base.is_empty() || subscript.is_empty() {
        return None;
    }

    if subscript == "*" {
        return Some(BusName {
            base: base.to_string(),
            from: 0,
            to: 0,
            is_range: false,
            subscript_wild: true,
        });
    }

    match subscript.split_once(':') {
        Some((from, to)) => {
            let from = i32::from_str(from.trim()).ok()?;
            let to = i32::from_str(to.trim()).ok()?;
            Some(BusName {
                base: base.to_string(),
                from,
                to,
                is_range: true,
                subscript_wild: false,
            })
        }
        None => {
            let bit = i32::from_str(subscript.trim()).ok()?;
            Some(BusName {
                base: base.to_string(),
                from: bit,
                to: bit,
                is_range: false,
                subscript_wild: false,
            })
        }
    }
}

/// Index of the last occurrence of `needle` not preceded by `escape`.
fn find_unescaped(text: &str, needle: char, escape: char) -> Option<usize> {
    let mut search_end = text.len();
    while let Some(at) = text[..search_end].rfind(needle) {
        let escaped = text[..at].chars().next_back() == Some(escape);
        if !escaped {
            return Some(at);
        }
        search_end = at;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_descending_range() {
        let bus = parse_bus_name("data[7:0]", '[', ']', '\\').unwrap();
        assert_eq!(bus.base, "data");
        assert_eq!((bus.from, bus.to), (7, 0));
        assert!(bus.is_range);
        assert!(!bus.subscript_wild);
    }

    #[test]
    fn parses_ascending_range_and_single_bit() {
        let bus = parse_bus_name("q[0:3]", '[', ']', '\\').unwrap();
        assert_eq!((bus.from, bus.to), (0, 3));
        assert!(bus.is_range);

        let bit = parse_bus_name("q[5]", '[', ']', '\\').unwrap();
        assert_eq!((bit.from, bit.to), (5, 5));
        assert!(!bit.is_range);
    }

    #[test]
    fn wildcard_subscript_is_flagged() {
        let bus = parse_bus_name("mem[*]", '[', ']', '\\').unwrap();
        assert!(bus.subscript_wild);
    }

    #[test]
    fn escaped_brackets_belong_to_the_name() {
        assert_eq!(parse_bus_name("odd\\[2\\]", '[', ']', '\\'), None);
        let bus = parse_bus_name("odd\\[2\\][3:0]", '[', ']', '\\').unwrap();
        assert_eq!(bus.base, "odd\\[2\\]");
        assert_eq!((bus.from, bus.to), (3, 0));
    }

    #[test]
    fn unparsable_names_are_rejected() {
        assert_eq!(parse_bus_name("plain", '[', ']', '\\'), None);
        assert_eq!(parse_bus_name("a[b:c]", '[', ']', '\\'), None);
        assert_eq!(parse_bus_name("[3:0]", '[', ']', '\\'), None);
        assert_eq!(parse_bus_name("a[]", '[', ']', '\\'), None);
    }
}
