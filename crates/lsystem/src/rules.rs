use std::collections::BTreeMap;

use tracing::debug;

use crate::system::LSystemError;

/// Production rules: symbol → replacement.
pub type Rules = BTreeMap<char, String>;

/// Parse rule text such as `"X->+FXF-FXF-FXF+\nF->FXF"`.
///
/// Entries are separated by `\r`, `\n` or `;`. Each entry is split on `->`
/// or `=` with empty pieces dropped and must leave exactly two parts. The key
/// is the first character of the trimmed left part, the replacement is the
/// trimmed right part. Malformed entries are skipped and the first rule for a
/// key wins.
pub fn parse_rules(text: &str) -> Rules {
    let mut rules = Rules::new();
    for entry in text.split(['\r', '\n', ';']).filter(|e| !e.is_empty()) {
        let normalized = entry.replace("->", "=");
        let parts: Vec<&str> = normalized.split('=').filter(|p| !p.is_empty()).collect();
        let [left, right] = parts.as_slice() else {
            debug!(entry, parts = parts.len(), "ignoring malformed rule");
            continue;
        };
        let Some(key) = left.trim().chars().next() else {
            debug!(entry, "ignoring rule without a symbol");
            continue;
        };
        if rules.contains_key(&key) {
            debug!(entry, %key, "ignoring duplicate rule");
            continue;
        }
        rules.insert(key, right.trim().to_string());
    }
    rules
}

/// Apply `rules` to every symbol simultaneously, `iterations` times.
///
/// Symbols without a rule are copied unchanged. Fails once the string would
/// grow beyond `max_length` characters.
pub fn rewrite(
    axiom: &str,
    rules: &Rules,
    iterations: usize,
    max_length: usize,
) -> Result<String, LSystemError> {
    let mut current = axiom.to_string();
    for iteration in 0..iterations {
        let length: usize = current
            .chars()
            .map(|c| rules.get(&c).map_or(1, |r| r.chars().count()))
            .sum();
        if length > max_length {
            return Err(LSystemError::ExpansionTooLarge {
                iteration: iteration + 1,
                length,
                max_length,
            });
        }
        let mut next = String::with_capacity(length);
        for c in current.chars() {
            match rules.get(&c) {
                Some(replacement) => next.push_str(replacement),
                None => next.push(c),
            }
        }
        current = next;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_rules() {
        let rules = parse_rules("X->+FXF-FXF-FXF+\nF->FXF");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[&'X'], "+FXF-FXF-FXF+");
        assert_eq!(rules[&'F'], "FXF");
    }

    #[test]
    fn test_parse_separators() {
        let rules = parse_rules("A=AB;B = A\r\n");
        assert_eq!(rules[&'A'], "AB");
        assert_eq!(rules[&'B'], "A");
    }

    #[test]
    fn test_parse_first_rule_wins() {
        let rules = parse_rules("F->FF\nF->F+F");
        assert_eq!(rules[&'F'], "FF");
    }

    #[test]
    fn test_parse_skips_malformed() {
        let rules = parse_rules("X->\n->Y\nA->B->C\n  \nF->G");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[&'F'], "G");
        // "->Y" leaves the single part "Y"; "  " has no separator
        assert!(!rules.contains_key(&'Y'));
        // "A->B->C" splits into three parts
        assert!(!rules.contains_key(&'A'));
        // whitespace-only keys are rejected too
        assert_eq!(parse_rules("  ->F").len(), 0);
        // "X->" alone is one part
        assert!(!rules.contains_key(&'X'));
    }

    #[test]
    fn test_key_is_first_char() {
        let rules = parse_rules(" XY -> F ");
        assert_eq!(rules[&'X'], "F");
    }

    #[test]
    fn test_rewrite_single_step() {
        let rules = parse_rules("X->F");
        assert_eq!(rewrite("X", &rules, 1, 1000).unwrap(), "F");
    }

    #[test]
    fn test_rewrite_is_simultaneous() {
        let rules = parse_rules("A->AB\nB->A");
        assert_eq!(rewrite("A", &rules, 4, 1000).unwrap(), "ABAABABA");
    }

    #[test]
    fn test_rewrite_zero_iterations() {
        assert_eq!(rewrite("F+F", &Rules::new(), 0, 10).unwrap(), "F+F");
    }

    #[test]
    fn test_rewrite_guard() {
        let rules = parse_rules("F->FF");
        let err = rewrite("F", &rules, 10, 100).unwrap_err();
        assert_eq!(
            err,
            LSystemError::ExpansionTooLarge {
                iteration: 7,
                length: 128,
                max_length: 100
            }
        );
    }
}
