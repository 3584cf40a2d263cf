use super::*;

const TRICKY_TITLES: &[&str] = &[
    "Robot Rabbits",
    "Robot Rabbits: The Sequel",
    "  Leading and trailing spaces  ",
    "Punctuation!!! Everywhere??? (Really)",
    "Dashes - in -- the --- middle",
    "-leading-and-trailing-",
    "Well-known well--known",
    "Ünïcödé Çhàracters and emoji 🐇",
    "ALL CAPS TITLE",
    "Numbers 1 2 3 and 42",
    "tab\tseparated\nand newline",
    "",
    "   ",
    ":",
    "!!!",
    "---",
    "A very long title that keeps going well past the six word limit",
];

fn assert_well_formed(slug: &str) {
    assert!(!slug.is_empty(), "empty slug");
    assert!(
        slug.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
        "bad chars in {slug:?}"
    );
    assert!(!slug.starts_with('-'), "leading hyphen in {slug:?}");
    assert!(!slug.ends_with('-'), "trailing hyphen in {slug:?}");
    assert!(!slug.contains("--"), "doubled hyphen in {slug:?}");
}

#[test]
fn simple_title() {
    let used = HashSet::new();
    assert_eq!(generate_slug("Robot Rabbits", &used, 6), "robot-rabbits");
}

#[test]
fn truncates_at_colon() {
    let used = HashSet::new();
    assert_eq!(
        generate_slug("Robot Rabbits: Part Two", &used, 6),
        "robot-rabbits"
    );
    assert_eq!(generate_slug("Ducks: a: b", &used, 6), "ducks");
}

#[test]
fn strips_punctuation_and_case() {
    let used = HashSet::new();
    assert_eq!(
        generate_slug("Why Don't Cats Wear HATS?", &used, 6),
        "why-dont-cats-wear-hats"
    );
}

#[test]
fn limits_to_max_words() {
    let used = HashSet::new();
    assert_eq!(
        generate_slug("one two three four five six seven eight", &used, 6),
        "one-two-three-four-five-six"
    );
    assert_eq!(
        generate_slug("one two three four", &used, 2),
        "one-two"
    );
}

#[test]
fn lengthens_prefix_on_collision() {
    let used: HashSet<String> = ["one-two".to_string()].into_iter().collect();
    assert_eq!(generate_slug("one two three four", &used, 2), "one-two-three");
}

#[test]
fn numbers_when_every_prefix_collides() {
    let used: HashSet<String> = ["one-two", "one-two-three", "one-two-2"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(generate_slug("one two three", &used, 2), "one-two-3");
}

#[test]
fn numbering_reachable_for_short_titles() {
    let used: HashSet<String> = ["ducks".to_string()].into_iter().collect();
    assert_eq!(generate_slug("Ducks", &used, 6), "ducks-2");
}

#[test]
fn untitled_fallback() {
    let used = HashSet::new();
    assert_eq!(generate_slug("", &used, 6), UNTITLED);
    assert_eq!(generate_slug("!!! ???", &used, 6), UNTITLED);
    assert_eq!(generate_slug(": subtitle only", &used, 6), UNTITLED);
}

#[test]
fn untitled_fallback_is_unique() {
    let mut registry = SlugRegistry::new();
    assert_eq!(registry.issue(""), "untitled");
    assert_eq!(registry.issue("???"), "untitled-2");
    assert_eq!(registry.issue("---"), "untitled-3");
}

#[test]
fn hyphens_collapse_inside_words() {
    let used = HashSet::new();
    assert_eq!(
        generate_slug("Dashes - in -- the --- middle", &used, 6),
        "dashes-in-the-middle"
    );
    assert_eq!(generate_slug("well--known", &used, 6), "well-known");
}

#[test]
fn zero_max_words_treated_as_one() {
    let used = HashSet::new();
    assert_eq!(generate_slug("alpha beta", &used, 0), "alpha");
}

#[test]
fn every_title_yields_well_formed_slug() {
    let used = HashSet::new();
    for title in TRICKY_TITLES {
        assert_well_formed(&generate_slug(title, &used, DEFAULT_MAX_WORDS));
    }
}

#[test]
fn generation_is_deterministic() {
    let used: HashSet<String> = ["robot-rabbits".to_string()].into_iter().collect();
    for title in TRICKY_TITLES {
        assert_eq!(
            generate_slug(title, &used, DEFAULT_MAX_WORDS),
            generate_slug(title, &used, DEFAULT_MAX_WORDS),
        );
    }
}

#[test]
fn shared_registry_yields_distinct_slugs() {
    let mut registry = SlugRegistry::with_max_words(2);
    let mut titles: Vec<&str> = TRICKY_TITLES.to_vec();
    // Repeat everything to force the numbering path
    titles.extend_from_slice(TRICKY_TITLES);
    titles.extend_from_slice(TRICKY_TITLES);

    let slugs: Vec<String> = titles.iter().map(|t| registry.issue(t)).collect();
    let distinct: HashSet<&String> = slugs.iter().collect();
    assert_eq!(distinct.len(), slugs.len());
    assert_eq!(registry.len(), slugs.len());
    for slug in &slugs {
        assert_well_formed(slug);
    }
}

#[test]
fn claim_reports_collisions() {
    let mut registry = SlugRegistry::new();
    assert!(registry.claim("robot-rabbits"));
    assert!(!registry.claim("robot-rabbits"));
    assert!(registry.contains("robot-rabbits"));
    assert_eq!(registry.issue("Robot Rabbits"), "robot-rabbits-2");
}

#[test]
fn registries_are_independent() {
    let mut a = SlugRegistry::new();
    let mut b = SlugRegistry::new();
    assert_eq!(a.issue("Ducks"), "ducks");
    assert_eq!(b.issue("Ducks"), "ducks");
    assert!(b.iter().eq(["ducks"]));
}
