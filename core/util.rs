// Small string helpers shared by the session layers
use rand::rngs::OsRng;
use rand::Rng;

const ALPHA_NUM: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// `len` characters drawn uniformly from `[0-9A-Za-z]` using the OS CSPRNG.
pub fn gen_random_alpha_num(len: usize) -> String {
    let mut rng = OsRng;
    (0..len)
        .map(|_| ALPHA_NUM[rng.gen_range(0..ALPHA_NUM.len())] as char)
        .collect()
}

/// Split on `delim` the way a line reader does: a trailing delimiter does not
/// produce an empty last item, and an empty input yields nothing.
pub fn split(s: &str, delim: char) -> Vec<String> {
    let mut items: Vec<String> = s.split(delim).map(str::to_string).collect();
    if items.last().is_some_and(|last| last.is_empty()) {
        items.pop();
    }
    items
}

/// Replace the first occurrence of `from`. Returns whether anything changed.
pub fn replace(s: &mut String, from: &str, to: &str) -> bool {
    match s.find(from) {
        Some(start) => {
            s.replace_range(start..start + from.len(), to);
            true
        }
        None => false,
    }
}

/// Replace every non-overlapping occurrence of `from`, scanning left to right.
/// Replacement text is never re-scanned. Returns the number of replacements.
pub fn replace_all(s: &mut String, from: &str, to: &str) -> usize {
    if from.is_empty() {
        return 0;
    }
    let count = s.matches(from).count();
    if count > 0 {
        *s = s.replace(from, to);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_inner_empty_fields() {
        assert_eq!(split("a,,b", ','), vec!["a", "", "b"]);
    }

    #[test]
    fn split_drops_only_trailing_empty_field() {
        assert_eq!(split("a,b,", ','), vec!["a", "b"]);
        assert_eq!(split(",", ','), vec![""]);
        assert!(split("", ',').is_empty());
    }

    #[test]
    fn replace_touches_first_match_only() {
        let mut s = String::from("x-x-x");
        assert!(replace(&mut s, "x", "yy"));
        assert_eq!(s, "yy-x-x");
        assert!(!replace(&mut s, "z", "q"));
    }

    #[test]
    fn replace_all_does_not_rescan_replacement() {
        let mut s = String::from("x-x");
        assert_eq!(replace_all(&mut s, "x", "yx"), 2);
        assert_eq!(s, "yx-yx");
    }

    #[test]
    fn random_alpha_num_has_requested_length_and_alphabet() {
        for len in [1, 16, 500] {
            let s = gen_random_alpha_num(len);
            assert_eq!(s.len(), len);
            assert!(s.bytes().all(|b| b.is_ascii_alphanumeric()), "bad chars in {s}");
        }
        assert_eq!(gen_random_alpha_num(0), "");
    }

    #[test]
    fn random_alpha_num_is_not_constant() {
        // 62^32 possibilities; a repeat means the generator is broken
        assert_ne!(gen_random_alpha_num(32), gen_random_alpha_num(32));
        assert_eq!(ALPHA_NUM.len(), 62);
    }

    #[test]
    fn replace_all_with_empty_pattern_is_noop() {
        let mut s = String::from("abc");
        assert_eq!(replace_all(&mut s, "", "z"), 0);
        assert_eq!(s, "abc");
    }
}
