use super::*;

fn hasher() -> BlockHasher {
    BlockHasher::new(0, 0)
}

// ── normalize ──────────────────────────────────────────────────────────

#[test]
fn strings_become_placeholders() {
    let h = hasher();
    let a = h.normalize(r#"emit("first message");"#);
    let b = h.normalize(r#"emit('a totally different one');"#);
    assert_eq!(a, b);
    assert!(a.contains("STR"));
    assert!(!a.contains("first"));
}

#[test]
fn numbers_become_placeholders() {
    let h = hasher();
    assert_eq!(h.normalize("retry(3, 1.5);"), h.normalize("retry(10, 0.25);"));
}

#[test]
fn comments_are_stripped() {
    let h = hasher();
    let a = h.normalize("run(); // fire the job\n/* old note */ wait();");
    assert_eq!(a, "run(); wait();");
}

#[test]
fn declaration_keyword_and_name_collapse() {
    let h = hasher();
    let a = h.normalize("const total = compute();");
    let b = h.normalize("var bucket = compute();");
    assert_eq!(a, b);
    assert!(a.starts_with("DECL"));
}

#[test]
fn declared_name_usage_elsewhere_is_kept() {
    let h = hasher();
    let a = h.normalize("let total = load();\nreturn total;");
    assert!(a.contains("return total"));
}

#[test]
fn anonymous_function_keyword_collapses() {
    let h = hasher();
    let a = h.normalize("items.forEach(function (item) { push(item); });");
    assert!(a.contains("FN("));
    assert!(!a.contains("function"));
}

#[test]
fn method_call_receiver_is_dropped() {
    let h = hasher();
    let a = h.normalize("this.flush(queue);");
    let b = h.normalize("writer.flush(queue);");
    assert_eq!(a, b);
    assert!(a.starts_with("flush("));
}

#[test]
fn call_chains_collapse_to_final_member() {
    let h = hasher();
    let a = h.normalize("app.session.store.save(state);");
    assert!(a.starts_with("save("));
}

#[test]
fn plain_property_access_is_untouched() {
    let h = hasher();
    // no call parentheses, so the receiver stays
    let a = h.normalize("return rows.length;");
    assert!(a.contains("rows.length"));
}

#[test]
fn property_keys_canonicalize() {
    let h = hasher();
    let a = h.normalize("{ width: 10, height: 20 }");
    let b = h.normalize("{ cols: 10, rows: 20 }");
    assert_eq!(a, b);
    assert!(a.contains("NAME ="));
}

#[test]
fn whitespace_runs_collapse() {
    let h = hasher();
    assert_eq!(h.normalize("  a   =\t b ;  "), "a = b ;");
}

// ── hash_window ────────────────────────────────────────────────────────

const BLOCK_A: [&str; 5] = [
    "const total = fetchRows(\"users\");",
    "const summary = this.summarize(db);",
    "emit(\"done\");",
    "cleanup(42);",
    "return 1;",
];

// Same structure as BLOCK_A with different declared names, receivers,
// strings and numbers.
const BLOCK_B: [&str; 5] = [
    "const count = fetchRows(\"accounts\");",
    "const digest = session.summarize(db);",
    "emit(\"finished\");",
    "cleanup(7);",
    "return 2;",
];

const BLOCK_OTHER: [&str; 5] = [
    "if (limit == 0) {",
    "    throw makeError(\"bad limit\");",
    "}",
    "const scale = limit * factor;",
    "return applyScale(scale, input);",
];

#[test]
fn identical_windows_hash_identically() {
    let h = BlockHasher::new(40, 8);
    assert_eq!(h.hash_window(&BLOCK_A), h.hash_window(&BLOCK_A));
}

#[test]
fn superficial_variation_hashes_identically() {
    let h = BlockHasher::new(40, 8);
    let a = h.hash_window(&BLOCK_A).unwrap();
    let b = h.hash_window(&BLOCK_B).unwrap();
    assert_eq!(a, b);
}

#[test]
fn structurally_different_windows_hash_differently() {
    let h = BlockHasher::new(40, 8);
    let a = h.hash_window(&BLOCK_A).unwrap();
    let other = h.hash_window(&BLOCK_OTHER).unwrap();
    assert_ne!(a, other);
}

#[test]
fn short_normalized_text_is_discarded() {
    let h = BlockHasher::new(40, 1);
    assert!(h.hash_window(&["}", "}", "}", "}", "}"]).is_none());
}

#[test]
fn low_token_windows_are_discarded() {
    let h = BlockHasher::new(1, 8);
    assert!(h.hash_window(&["aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa;"]).is_none());
}
