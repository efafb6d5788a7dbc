use super::*;

#[test]
fn max_width_uses_longest_label() {
    let labels = ["a.ts", "src/deep/path.ts", "b.ts"];
    assert_eq!(max_width(labels.iter().copied(), 4), 16);
}

#[test]
fn max_width_respects_minimum() {
    let labels = ["a"];
    assert_eq!(max_width(labels.iter().copied(), 10), 10);
    assert_eq!(max_width(std::iter::empty(), 7), 7);
}

#[test]
fn separator_has_requested_width() {
    let s = separator(5);
    assert_eq!(s.chars().count(), 5);
    assert!(s.chars().all(|c| c == '\u{2500}'));
}

#[test]
fn print_json_stdout_accepts_serializable() {
    #[derive(serde::Serialize)]
    struct Tiny {
        n: u32,
    }
    print_json_stdout(&Tiny { n: 1 }).unwrap();
}
