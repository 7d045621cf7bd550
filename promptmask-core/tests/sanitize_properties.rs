// promptmask-core/tests/sanitize_properties.rs
use promptmask_core::{sanitize, sanitize_selected, test_pattern, validate_pattern, Rule};
use test_log::test;

fn literal(id: &str, pattern: &str, replacement: &str) -> Rule {
    Rule::new(id, pattern, replacement).with_id(id)
}

fn regex(id: &str, pattern: &str, replacement: &str, flags: Option<&str>) -> Rule {
    Rule::new(id, pattern, replacement).with_id(id).with_regex(flags)
}

#[test]
fn test_empty_rule_set_is_a_no_op() {
    for text in ["", "plain text", "a@x.com 127.0.0.1", "ünïcödé\nlines"] {
        let result = sanitize(text, &[]);
        assert_eq!(result.original_text, text);
        assert_eq!(result.sanitized_text, text);
        assert!(result.applied_rules.is_empty());
        assert!(!result.has_changes);
    }
}

#[test]
fn test_disabled_rules_never_fire() {
    let rules = vec![
        literal("a", "secret", "[S]").disabled(),
        regex("b", r"\d+", "[N]", Some("g")).disabled(),
    ];
    let result = sanitize("secret 42", &rules);
    assert!(!result.has_changes);
    assert!(result.applied_rules.is_empty());
    assert_eq!(result.sanitized_text, "secret 42");
}

#[test]
fn test_later_rules_see_earlier_output() {
    let rules = vec![literal("r1", "foo", "[A]"), literal("r2", "[A]_1", "[B]")];
    let result = sanitize("foo", &rules);
    assert_eq!(result.sanitized_text, "[B]_1");
    assert_eq!(result.applied_rules.len(), 2);
}

#[test]
fn test_order_changes_the_outcome() {
    let rules = vec![literal("r2", "[A]_1", "[B]"), literal("r1", "foo", "[A]")];
    let result = sanitize("foo", &rules);
    assert_eq!(result.sanitized_text, "[A]_1");
    assert_eq!(result.applied_rules.len(), 1);
    assert_eq!(result.applied_rules[0].rule.id, "r1");
}

#[test]
fn test_distinct_values_get_indexed_tokens() {
    let rule = regex("email", r"[a-z]+@[a-z]+\.com", "[EMAIL]", Some("g"));
    let result = sanitize("contact a@x.com or b@y.com or a@x.com again", &[rule]);

    assert_eq!(result.sanitized_text, "contact [EMAIL]_1 or [EMAIL]_2 or [EMAIL]_1 again");
    assert!(result.has_changes);

    let applied = &result.applied_rules[0];
    assert_eq!(applied.match_count, 3);
    assert_eq!(applied.replacement_map.len(), 2);
    assert_eq!(applied.replacement_map.get("a@x.com"), Some("[EMAIL]_1"));
    assert_eq!(applied.replacement_map.get("b@y.com"), Some("[EMAIL]_2"));
}

#[test]
fn test_indexing_restarts_per_call() {
    let rule = regex("email", r"[a-z]+@[a-z]+\.com", "[EMAIL]", None);
    let first = sanitize("b@y.com", std::slice::from_ref(&rule));
    let second = sanitize("a@x.com b@y.com", std::slice::from_ref(&rule));
    assert_eq!(first.sanitized_text, "[EMAIL]_1");
    assert_eq!(second.sanitized_text, "[EMAIL]_1 [EMAIL]_2");
}

#[test]
fn test_literal_mode_is_never_a_regex() {
    let rule = literal("dot", "a.b", "[DOT]");
    let result = sanitize("a.b and axb", &[rule]);
    assert_eq!(result.sanitized_text, "[DOT]_1 and axb");
    assert_eq!(result.applied_rules[0].matches, vec!["a.b"]);
}

#[test]
fn test_literal_metacharacters_survive() {
    let rule = literal("price", "$1.00 (approx)", "[PRICE]");
    let result = sanitize("cost: $1.00 (approx), not $1x00 (approx)", &[rule]);
    assert_eq!(result.sanitized_text, "cost: [PRICE]_1, not $1x00 (approx)");
}

#[test]
fn test_zero_length_matches_terminate() {
    let rule = regex("xs", "x*", "[X]", None);
    let result = sanitize("axxbxc", &[rule.clone()]);
    assert_eq!(result.sanitized_text, "a[X]_1b[X]_2c");
    assert_eq!(result.applied_rules[0].matches, vec!["xx", "x"]);

    let only_empty = sanitize("abc", &[regex("empty", "^", "[E]", Some("gm"))]);
    assert!(!only_empty.has_changes);
    assert!(only_empty.applied_rules.is_empty());
}

#[test]
fn test_replacement_map_reverses_a_single_rule() {
    let original = "ping 10.0.0.1 then 10.0.0.2 then 10.0.0.1";
    let rule = regex("ip", r"\d+\.\d+\.\d+\.\d+", "[IP]", None);
    let result = sanitize(original, &[rule]);

    let mut restored = result.sanitized_text.clone();
    for (token, value) in result.applied_rules[0].replacement_map.reverse().iter() {
        restored = restored.replace(token, value);
    }
    assert_eq!(restored, original);
}

#[test]
fn test_pattern_count_matches_sanitize() {
    let text = "k1=sk-aaaa k2=sk-bbbb k3=sk-aaaa SK-CCCC";
    let cases = vec![
        regex("keys", r"sk-[a-z]+", "[KEY]", Some("g")),
        regex("keys_ci", r"sk-[a-z]+", "[KEY]", Some("gi")),
        literal("lit", "sk-aaaa", "[KEY]"),
        regex("empty_ok", "z*", "[Z]", None),
    ];

    for rule in cases {
        let preview = test_pattern(text, &rule.pattern, rule.is_regex, rule.flags.as_deref());
        let result = sanitize(text, std::slice::from_ref(&rule));
        let applied = result.applied_rules.first().map(|a| a.match_count).unwrap_or(0);
        assert_eq!(preview.count, applied, "rule {}", rule.id);
        assert_eq!(preview.matches.len(), preview.count);
    }
}

#[test]
fn test_pattern_count_matches_sanitize_for_long_values() {
    let text = format!("token={} done", "q".repeat(2_000_000));
    let rule = regex("word", "[a-z]+", "[WORD]", None);

    let preview = test_pattern(&text, &rule.pattern, rule.is_regex, rule.flags.as_deref());
    let result = sanitize(&text, std::slice::from_ref(&rule));

    assert!(result.has_changes);
    assert!(result.skipped_rules.is_empty());
    assert_eq!(preview.count, 3);
    assert_eq!(result.applied_rules[0].match_count, preview.count);
    assert_eq!(result.sanitized_text, "[WORD]_1=[WORD]_2 [WORD]_3");
}

#[test]
fn test_validation_rejects_empty_and_malformed() {
    assert!(!validate_pattern("", true).valid);
    assert!(!validate_pattern("", false).valid);
    assert!(!validate_pattern("(unclosed", true).valid);
    assert!(validate_pattern("(unclosed", false).valid);
}

#[test]
fn test_broken_rule_does_not_block_others() {
    let rules = vec![
        literal("first", "alpha", "[A]"),
        regex("broken", "[z-a]", "[BROKEN]", None),
        literal("last", "omega", "[O]"),
    ];
    let result = sanitize("alpha to omega", &rules);
    assert_eq!(result.sanitized_text, "[A]_1 to [O]_1");
    assert_eq!(result.skipped_rules.len(), 1);
    assert_eq!(result.skipped_rules[0].rule_id, "broken");
}

#[test]
fn test_rules_are_not_mutated() {
    let rules = vec![literal("a", "x", "[X]"), literal("b", "y", "[Y]").disabled()];
    let before = rules.clone();
    let _ = sanitize("x y", &rules);
    let _ = sanitize_selected("x y", &rules, &["b"]);
    assert_eq!(rules, before);
}

#[test]
fn test_selective_preview_applies_only_listed_rules() {
    let rules = vec![
        literal("a", "x", "[X]"),
        literal("b", "y", "[Y]").disabled(),
        literal("c", "z", "[Z]"),
    ];
    let result = sanitize_selected("x y z", &rules, &["c", "b"]);
    assert_eq!(result.sanitized_text, "x [Y]_1 [Z]_1");
    let ids: Vec<&str> = result.applied_rules.iter().map(|a| a.rule.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "c"]);
}

#[test]
fn test_result_serializes_to_json() -> anyhow::Result<()> {
    let rule = regex("email", r"[a-z]+@[a-z]+\.com", "[EMAIL]", None);
    let result = sanitize("b@y.com and a@x.com", &[rule]);
    let json: serde_json::Value = serde_json::to_value(&result)?;

    assert_eq!(json["has_changes"], true);
    assert_eq!(json["applied_rules"][0]["match_count"], 2);
    assert_eq!(json["applied_rules"][0]["replacement_map"]["b@y.com"], "[EMAIL]_1");
    Ok(())
}
