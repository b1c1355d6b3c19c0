/// Turn a file or directory name into a display label.
///
/// Hyphens and underscores become spaces and the first character of every
/// space-separated word is upper-cased; the rest of each word keeps its
/// casing. `"data-types"` becomes `"Data Types"`, `"http_2"` becomes
/// `"Http 2"`.
pub fn format_name(name: &str) -> String {
    name.replace(['-', '_'], " ")
        .split(' ')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::format_name;

    #[test]
    fn replaces_separators_and_capitalizes_words() {
        assert_eq!(format_name("data-types"), "Data Types");
        assert_eq!(format_name("a_b_c"), "A B C");
        assert_eq!(format_name("http_2"), "Http 2");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(format_name(""), "");
    }

    #[test]
    fn keeps_tail_casing_and_spacing() {
        assert_eq!(format_name("getting-startedWithAPIs"), "Getting StartedWithAPIs");
        assert_eq!(format_name("double--dash"), "Double  Dash");
        assert_eq!(format_name("-leading"), " Leading");
    }

    #[test]
    fn handles_non_ascii_initials() {
        assert_eq!(format_name("élan_vital"), "Élan Vital");
    }
}
