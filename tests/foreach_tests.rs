use php2js::{translate, TranslateError, Unit};

fn js(source: &str) -> String {
    translate(Unit::Source(source), false).expect("translation failed")
}

fn js_packed(source: &str) -> String {
    translate(Unit::Source(source), true).expect("translation failed")
}

fn js_err(source: &str) -> TranslateError {
    translate(Unit::Source(source), false).expect_err("translation should fail")
}

#[test]
fn test_value_only_loop_gets_synthetic_key() {
    let out = js("foreach ($items as $item) {\n    work($item);\n}");
    assert_eq!(
        out,
        "for (key in items) {\n    var item = items[key]; \n    work(item);\n} "
    );
}

#[test]
fn test_key_value_loop() {
    let out = js("foreach ($map as $k => $v) {\n    put($k, $v);\n}");
    assert_eq!(
        out,
        "for (k in map) {\n    var v = map[k]; \n    put(k, v);\n} "
    );
}

#[test]
fn test_body_keywords_are_still_lowered() {
    let out = js("foreach ($a as $b) {\n    echo $b;\n}");
    assert_eq!(out, "for (key in a) {\n    var b = a[key]; \n    alert( b);\n} ");
}

#[test]
fn test_nested_loops_reuse_the_synthetic_key() {
    let out = js(
        "foreach ($rows as $row) {\n    foreach ($row as $cell) {\n        f($cell);\n    }\n}",
    );
    assert_eq!(
        out,
        "for (key in rows) {\n    var row = rows[key]; \n    for (key in row) {\n        var cell = row[key]; \n        f(cell);\n    }\n} "
    );
}

#[test]
fn test_comment_before_body_is_skipped() {
    let out = js("foreach ($a as $b) /* note */ {\n    f($b);\n}");
    assert_eq!(out, "for (key in a)  {\n    var b = a[key]; \n    f(b);\n} ");
}

#[test]
fn test_iterable_expression_is_duplicated_into_binding() {
    let out = js("foreach (array(1, 2) as $v) {\n    f($v);\n}");
    assert_eq!(
        out,
        "for (key in [1, 2]) {\n    var v = [1, 2][key]; \n    f(v);\n} "
    );
}

#[test]
fn test_call_in_header_keeps_its_parentheses() {
    let out = js("foreach (f($a) as $b) {\n    g($b);\n}");
    assert_eq!(out, "for (key in f(a)) {\n    var b = f(a)[key]; \n    g(b);\n} ");
}

#[test]
fn test_uppercase_keywords() {
    let out = js("FOREACH ($a AS $b) {\n    f();\n}");
    assert_eq!(out, "for (key in a) {\n    var b = a[key]; \n    f();\n} ");
}

#[test]
fn test_arrow_before_as_degrades_to_value_form() {
    // A `=>` in the iterable position is not a key binding; the loop falls
    // back to the synthetic key and the arrow is carried along verbatim
    let out = js("foreach ($a => $b as $c) {\n    f();\n}");
    assert_eq!(
        out,
        "for (key in a : b) {\n    var c = a : b[key]; \n    f();\n} "
    );
}

#[test]
fn test_pack_mode_leaves_rewritten_body_text_alone() {
    let out = js_packed("foreach ($items as $item) {\n    work($item);\n}");
    assert_eq!(
        out,
        "for (key in items) {\n    var item = items[key]; work(item); } "
    );
}

#[test]
fn test_missing_as_is_rejected() {
    let err = js_err("foreach ($x) {}");
    assert_eq!(
        err.to_string(),
        "Malformed construct: invalid foreach declaration: $x"
    );
}

#[test]
fn test_statement_body_is_rejected() {
    let err = js_err("foreach ($x as $y) bare();");
    assert_eq!(
        err.to_string(),
        "Malformed construct: unexpected token 'bare' before foreach body"
    );
}

#[test]
fn test_alternative_syntax_is_rejected() {
    let err = js_err("foreach ($x as $y): endforeach;");
    assert_eq!(
        err.to_string(),
        "Malformed construct: unexpected token ':' before foreach body"
    );
}

#[test]
fn test_missing_body_at_end_of_input() {
    let err = translate(Unit::Source("<?php foreach ($x as $y)"), false)
        .expect_err("translation should fail");
    assert_eq!(err.to_string(), "Malformed construct: missing foreach body brace");
}

#[test]
fn test_unterminated_header() {
    let err =
        translate(Unit::Source("<?php foreach ($x as $y"), false).expect_err("translation should fail");
    assert_eq!(
        err.to_string(),
        "Malformed construct: invalid foreach declaration: ($x as $y"
    );
}

#[test]
fn test_plain_control_flow_passes_through() {
    // Only foreach is rewritten; if and while are ordinary identifiers
    assert_eq!(js("if ($a > 1) { f(); }"), "if (a > 1) { f(); } ");
    assert_eq!(js("while ($a) { g(); }"), "while (a) { g(); } ");
}
