use std::cmp::Ordering;

/// Fixed production order of shirt sizes
pub const SIZE_ORDER: [&str; 9] = ["XS", "S", "M", "L", "XL", "2XL", "3XL", "4XL", "5XL"];

/// Position of a size in [`SIZE_ORDER`] (case-insensitive), `None` for unknown sizes
pub fn size_rank(size: &str) -> Option<usize> {
    let size = size.trim();
    SIZE_ORDER
        .iter()
        .position(|known| known.eq_ignore_ascii_case(size))
}

/// Compare two sizes by production order.
///
/// Unknown sizes come after every known size and are ordered alphabetically
/// among themselves.
pub fn compare_sizes(a: &str, b: &str) -> Ordering {
    match (size_rank(a), size_rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// Sort a list of sizes in place by production order
pub fn sort_sizes(sizes: &mut [String]) {
    sizes.sort_by(|a, b| compare_sizes(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sizes_follow_fixed_order() {
        let mut sizes: Vec<String> = ["5XL", "M", "XS", "2XL", "L", "S", "XL", "4XL", "3XL"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        sort_sizes(&mut sizes);
        assert_eq!(sizes, SIZE_ORDER.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    }

    #[test]
    fn test_rank_is_case_insensitive() {
        assert_eq!(size_rank("xl"), Some(4));
        assert_eq!(size_rank(" 2xl "), Some(5));
        assert_eq!(size_rank("XXL"), None);
    }

    #[test]
    fn test_unknown_sizes_sort_last() {
        let mut sizes = vec![
            "Kids".to_string(),
            "XS".to_string(),
            "Free Size".to_string(),
            "5XL".to_string(),
        ];
        sort_sizes(&mut sizes);
        assert_eq!(sizes, vec!["XS", "5XL", "Free Size", "Kids"]);
        assert_eq!(compare_sizes("Kids", "XS"), Ordering::Greater);
        assert_eq!(compare_sizes("M", "M"), Ordering::Equal);
    }
}
