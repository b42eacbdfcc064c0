//! String helpers for hierarchical tags and launcher-facing titles.

use std::collections::HashSet;

/// Collapses hierarchical tags down to their leaves.
///
/// A tag is dropped when another tag in the set starts with it followed by
/// `sep`, so `[a, a/b, c]` becomes `[a/b, c]`. Empty entries and duplicates
/// are removed; surviving tags keep their first-seen order.
///
/// # Examples
///
/// ```
/// use freddiebear::tags::remove_intermediate_prefixes;
///
/// let tags = ["a", "a/b", "a/b/c", "d"];
/// assert_eq!(remove_intermediate_prefixes(&tags, "/"), vec!["a/b/c", "d"]);
/// ```
pub fn remove_intermediate_prefixes<S: AsRef<str>>(tags: &[S], sep: &str) -> Vec<String> {
    let candidates = unique_set(tags.iter().map(AsRef::as_ref).filter(|t| !t.is_empty()));

    candidates
        .iter()
        .filter(|tag| {
            let prefix = format!("{tag}{sep}");
            !candidates.iter().any(|other| other.starts_with(&prefix))
        })
        .cloned()
        .collect()
}

/// Uppercases the first letter of every word.
///
/// Strings that already start with an uppercase letter are returned as-is.
pub fn to_title_case(sentence: &str) -> String {
    match sentence.chars().next() {
        None => return String::new(),
        Some(first) if first.is_uppercase() => return sentence.to_string(),
        Some(_) => {}
    }

    let mut titled = String::with_capacity(sentence.len());
    let mut at_word_start = true;

    for ch in sentence.chars() {
        if at_word_start {
            titled.extend(ch.to_uppercase());
        } else {
            titled.push(ch);
        }
        at_word_start = ch == ' ';
    }

    titled
}

/// Removes duplicates, keeping the first occurrence of each item.
pub fn unique_set<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut uniques = Vec::new();

    for item in items {
        let item = item.into();
        if seen.insert(item.clone()) {
            uniques.push(item);
        }
    }

    uniques
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_to_leaf_tags() {
        let orig = [
            "fred",
            "fred/bear",
            "readings",
            "work",
            "work/coffee",
            "work/coffee/africa",
        ];
        let unique = remove_intermediate_prefixes(&orig, "/");

        assert_eq!(unique.len(), 3, "{unique:?}");
        assert!(unique.contains(&"readings".to_string()));
        assert!(unique.contains(&"fred/bear".to_string()));
        assert!(unique.contains(&"work/coffee/africa".to_string()));
        assert_eq!(orig.len(), 6);
    }

    #[test]
    fn collapse_is_order_independent() {
        let forward = remove_intermediate_prefixes(&["a", "a/b", "a/b/c", "a/b/c/d"], "/");
        let backward = remove_intermediate_prefixes(&["a/b/c/d", "a/b/c", "a/b", "a"], "/");

        assert_eq!(forward, vec!["a/b/c/d"]);
        assert_eq!(backward, vec!["a/b/c/d"]);
    }

    #[test]
    fn prefix_must_end_at_separator() {
        let unique = remove_intermediate_prefixes(&["work", "workshop"], "/");
        assert_eq!(unique, vec!["work", "workshop"]);
    }

    #[test]
    fn unrelated_tags_survive() {
        let unique = remove_intermediate_prefixes(&["a", "b", "c", "d"], "/");
        assert_eq!(unique, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn empties_and_duplicates_are_dropped() {
        let unique = remove_intermediate_prefixes(&["", "x", "x", "", "y/z"], "/");
        assert_eq!(unique, vec!["x", "y/z"]);
    }

    #[test]
    fn empty_input_collapses_to_nothing() {
        let none: [&str; 0] = [];
        assert!(remove_intermediate_prefixes(&none, "/").is_empty());
    }

    #[test]
    fn title_case_variants() {
        assert_eq!(to_title_case("bobby"), "Bobby");
        assert_eq!(to_title_case("bobby tables"), "Bobby Tables");
        assert_eq!(
            to_title_case("my name is bobby tables"),
            "My Name Is Bobby Tables"
        );
        assert_eq!(to_title_case("qrstuVwX"), "QrstuVwX");
        assert_eq!(to_title_case("Bobby tables"), "Bobby tables");
        assert_eq!(to_title_case(""), "");
    }

    #[test]
    fn title_case_handles_multibyte_characters() {
        assert_eq!(to_title_case("émile zola"), "Émile Zola");
        assert_eq!(to_title_case("a → b"), "A → B");
    }

    #[test]
    fn unique_set_keeps_first_seen_order() {
        assert_eq!(unique_set(["b", "a", "b", "c", "a"]), vec!["b", "a", "c"]);
    }
}
