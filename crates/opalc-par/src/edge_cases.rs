//! Parser tests: emission shapes, scope discipline, error conditions.

use opalc_gen::Output;
use opalc_sem::{ScopeKind, TypeKind};
use opalc_util::{CompileError, Symbol};

use crate::Parser;

fn compile_ok(source: &str) -> Output {
    crate::compile(source.as_bytes(), "out").expect("program should compile")
}

fn compile_err(source: &str) -> String {
    match crate::compile(source.as_bytes(), "out") {
        Ok(_) => panic!("program should not compile"),
        Err(CompileError::Fatal { message, .. }) => message,
        Err(other) => panic!("unexpected error kind: {}", other),
    }
}

// ---------------------------------------------------------------------------
// Whole-program shapes
// ---------------------------------------------------------------------------

#[test]
fn empty_program_emission() {
    let out = compile_ok("fn start() i32 { return 0; }");
    assert_eq!(out.decl, "t$i32 fn_start();\n");
    assert_eq!(out.types, "");
    assert_eq!(
        out.imp,
        "#include <builtin.type.h>\n\
         #include \"out.type.h\"\n\
         #include \"out.decl.h\"\n\
         #include <library.impl.h>\n\
         \n\
         t$i32 fn_start() {\n\
         \x20   return 0x0;\n\
         }\n\
         \n\
         #include <library.impl.c>\n"
    );
}

#[test]
fn include_prelude_uses_the_output_base() {
    let out = crate::compile(b"fn start() i32 { return 0; }", "demo/prog")
        .expect("program should compile");
    assert!(out.imp.contains("#include \"demo/prog.type.h\"\n"));
    assert!(out.imp.contains("#include \"demo/prog.decl.h\"\n"));
}

#[test]
fn scope_stack_balances_after_every_declaration() {
    let source = "
        enum { A, B, };
        struct Pair { a u32, b u32, };
        var g u32 = 7;
        fn f(x u32) u32 { if x > 0 { while x > 1 { x -= 1; } } return x; }
    ";
    let mut parser = Parser::new(source.as_bytes(), "out");
    parser.parse_program().expect("program should compile");
    assert_eq!(parser.scopes.current_kind(), ScopeKind::Global);
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[test]
fn enum_auto_numbering_skips_explicit_tags() {
    let out = compile_ok("enum { A, B = 5, C, };");
    assert!(out
        .imp
        .contains("#define c$A 0x0\n#define c$B 5\n#define c$C 0x1\n"));
}

#[test]
fn named_enum_gets_a_typedef() {
    let out = compile_ok("enum Color { RED, GREEN, BLUE, };");
    assert_eq!(out.types, "typedef t$u32 t$Color;\n");
    assert!(out.imp.contains("#define c$RED 0x0\n"));
    assert!(out.imp.contains("#define c$BLUE 0x2\n"));
}

#[test]
fn enum_value_expression_is_verbatim() {
    let out = compile_ok("enum { SHIFTED = 1 << 4, NEXT, };");
    assert!(out.imp.contains("#define c$SHIFTED 1 << 4\n"));
    assert!(out.imp.contains("#define c$NEXT 0x0\n"));
}

#[test]
fn enum_tag_can_reference_earlier_tag() {
    let out = compile_ok("enum { BASE = 8, ALIAS = BASE, };");
    assert!(out.imp.contains("#define c$ALIAS c$BASE\n"));
}

#[test]
fn enum_values_mangle_in_expressions() {
    let out = compile_ok("enum { LIMIT = 16, };\nfn f() u32 { return LIMIT; }");
    assert!(out.imp.contains("return c$LIMIT;\n"));
}

#[test]
fn duplicate_enum_tag_is_fatal() {
    let message = compile_err("enum { A, A, };");
    assert_eq!(message, "enum tag 'A' already defined");
}

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

#[test]
fn forward_struct_reference_through_pointer_field() {
    let out = compile_ok(
        "struct Node { next *Node, value u32, };\n\
         fn f() { var n Node; n.value = 1; }",
    );
    assert_eq!(out.types, "typedef struct t$Node t$Node;\n");
    assert_eq!(
        out.decl,
        "struct t$Node {\n    t$Node *next;\n    t$u32 value;\n};\nt$void fn_f();\n"
    );
    assert!(out.imp.contains("t$Node *$n = 0;\n"));
    assert!(out.imp.contains("$n->value = 0x1;\n"));
    // Exactly one typedef for the forward-referenced name.
    assert_eq!(out.types.matches("t$Node").count(), 2);
}

#[test]
fn forward_struct_registry_state() {
    let source = "struct Node { next *Node, value u32, };";
    let mut parser = Parser::new(source.as_bytes(), "out");
    parser.parse_program().expect("program should compile");

    let id = parser
        .types
        .find(Symbol::intern("Node"))
        .expect("Node registered");
    assert_eq!(parser.types.kind(id), TypeKind::Struct);
    let info = parser.types.get(id);
    assert_eq!(info.fields.len(), 2);
    assert_eq!(info.fields[0].name.as_str(), "next");
    assert_eq!(info.fields[0].ty, id);
    assert_eq!(info.fields[1].name.as_str(), "value");
}

#[test]
fn struct_redefinition_is_fatal() {
    let message = compile_err("struct S { a u32, };\nstruct S { b u32, };");
    assert_eq!(message, "struct 'S' already defined");
}

#[test]
fn non_pointer_field_cannot_forward_reference() {
    let message = compile_err("struct S { other Later, };");
    assert_eq!(message, "undefined type 'Later'");
}

#[test]
fn struct_literal_backs_a_pointer() {
    let out = compile_ok(
        "struct Point { x u32, y u32, };\n\
         fn f() { var p Point = { 1, 2 }; p.x = p.y; }",
    );
    assert!(out
        .imp
        .contains("t$Point $$p = { 0x1, 0x2, };\n    t$Point *$p = &$$p;\n"));
    assert!(out.imp.contains("$p->x = $p->y;\n"));
}

#[test]
fn struct_parameters_and_returns_pass_by_reference() {
    let out = compile_ok(
        "struct Node { next *Node, value u32, };\n\
         fn pick(n Node) Node { return n; }",
    );
    assert!(out.decl.contains("t$Node *fn_pick(t$Node *$n);\n"));
    assert!(out.imp.contains("\nt$Node *fn_pick(t$Node *$n) {\n"));
}

#[test]
fn field_access_on_non_struct_is_fatal() {
    let message = compile_err("fn f() { var x u32; x.field = 1; }");
    assert_eq!(message, "not a struct");
}

#[test]
fn missing_field_is_fatal() {
    let message = compile_err(
        "struct P { x u32, };\nfn f() { var p P; p.z = 1; }",
    );
    assert_eq!(message, "struct has no such field 'z'");
}

// ---------------------------------------------------------------------------
// Functions and statements
// ---------------------------------------------------------------------------

#[test]
fn duplicate_parameter_is_fatal() {
    let message = compile_err("fn f(a u32, a u32) { }");
    assert_eq!(message, "duplicate parameter 'a'");
}

#[test]
fn break_outside_loop_is_fatal() {
    let message = compile_err("fn f() { break; }");
    assert_eq!(message, "break must be used from inside a looping construct");
}

#[test]
fn continue_outside_loop_is_fatal() {
    let message = compile_err("fn f() { continue; }");
    assert_eq!(
        message,
        "continue must be used from inside a looping construct"
    );
}

#[test]
fn break_and_continue_inside_loop_emit() {
    let out = compile_ok(
        "fn f() { while true { if false { break; } else { continue; } } }",
    );
    assert!(out.imp.contains("break;\n"));
    assert!(out.imp.contains("continue;\n"));
}

#[test]
fn while_loop_emission() {
    let out = compile_ok("fn f() { var i u32 = 0; while i < 10 { i += 1; } }");
    assert!(out.imp.contains(
        "    t$u32 $i = 0x0;\n    while (($i < 0xa)) {\n        $i += 0x1;\n    }\n"
    ));
}

#[test]
fn if_else_chain_shares_brace_lines() {
    let out = compile_ok(
        "fn f(x u32) { if x == 1 { ; } else if x == 2 { ; } else { ; } }",
    );
    assert!(out.imp.contains(
        "    if (($x == 0x1)) {\n        ;\n    } else if (($x == 0x2)) {\n        ;\n    } else {\n        ;\n    }\n"
    ));
}

#[test]
fn return_without_value() {
    let out = compile_ok("fn f() { return; }");
    assert!(out.imp.contains("    return;\n"));
}

#[test]
fn increment_and_decrement_statements() {
    let out = compile_ok("fn f() { var x u32; x++; x--; }");
    assert!(out.imp.contains("$x++;\n"));
    assert!(out.imp.contains("$x--;\n"));
}

#[test]
fn compound_assignment_statements() {
    let out = compile_ok("fn f() { var x u32; x += 2; x <<= 1; x &= 3; }");
    assert!(out.imp.contains("$x += 0x2;\n"));
    assert!(out.imp.contains("$x <<= 0x1;\n"));
    assert!(out.imp.contains("$x &= 0x3;\n"));
}

// ---------------------------------------------------------------------------
// Variables
// ---------------------------------------------------------------------------

#[test]
fn scalar_zero_initialisation() {
    let out = compile_ok("var g u32;");
    assert!(out.imp.contains("t$u32 $g = 0;\n"));
}

#[test]
fn scalar_expression_initialisation() {
    let out = compile_ok("var g u32 = 40 + 2;");
    assert!(out.imp.contains("t$u32 $g = (0x28 + 0x2);\n"));
}

#[test]
fn array_types_synthesise_typedefs() {
    let out = compile_ok("var table [4]u8 = { 1, 2, 3, 4, };");
    assert_eq!(out.types, "typedef t$u8 t$u8$4[4];\n");
    assert!(out.imp.contains("t$u8$4 $table = { 0x1, 0x2, 0x3, 0x4, };\n"));
}

#[test]
fn array_zero_initialisation() {
    let out = compile_ok("var buf [16]u8;");
    assert!(out.imp.contains("t$u8$16 $buf = { 0, };\n"));
}

#[test]
fn open_array_typedef_is_the_flexible_form() {
    let out = compile_ok("fn f(data []u8) { data[0] = 1; }");
    assert_eq!(out.types, "typedef t$u8 t$u8$0[];\n");
    assert!(out.decl.contains("t$void fn_f(t$u8$0 $data);\n"));
    assert!(out.imp.contains("$data[0x0] = 0x1;\n"));
}

#[test]
fn repeated_array_types_reuse_one_typedef() {
    let out = compile_ok("var a [8]u32;\nvar b [8]u32;");
    assert_eq!(out.types.matches("typedef").count(), 1);
}

#[test]
fn string_variable_initialisation() {
    let out = compile_ok("var banner str = \"opal\\n\";");
    assert!(out.imp.contains("t$str $banner = (void*)\"opal\\x0a\";\n"));
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

#[test]
fn precedence_and_paren_elision() {
    let out = compile_ok("fn f() i32 { return 1 + 2 * 3 == 7; }");
    assert!(out.imp.contains("return ((0x1 + (0x2 * 0x3)) == 0x7);\n"));
}

#[test]
fn bare_primaries_stay_unwrapped() {
    let out = compile_ok("fn f() i32 { return 7; }");
    assert!(out.imp.contains("return 0x7;\n"));
    let out = compile_ok("fn f() i32 { return (7); }");
    assert!(out.imp.contains("return 0x7;\n"));
}

#[test]
fn logical_operators_emit_groups() {
    let out = compile_ok("fn f(a u32, b u32) i32 { return a == 1 || a < b && b != 0; }");
    assert!(out
        .imp
        .contains("return (($a == 0x1) || (($a < $b) && ($b != 0x0)));\n"));
}

#[test]
fn unary_operators_mark_their_group() {
    let out = compile_ok("fn f(x u32) i32 { return -x + 1; }");
    assert!(out.imp.contains("return ((-$x) + 0x1);\n"));
    let out = compile_ok("fn f(x u32) i32 { return !x; }");
    assert!(out.imp.contains("return (!$x);\n"));
    let out = compile_ok("fn f(x u32) i32 { return ~x; }");
    assert!(out.imp.contains("return (~$x);\n"));
}

#[test]
fn unary_address_of_is_rejected() {
    let message = compile_err("fn f(x u32) { x = &x; }");
    assert_eq!(message, "unary '&' is not supported");
}

#[test]
fn true_false_nil_lower_to_c_literals() {
    let out = compile_ok("fn f() { var a bool = true; var b bool = false; var c u32 = nil; }");
    assert!(out.imp.contains("t$bool $a = 1;\n"));
    assert!(out.imp.contains("t$bool $b = 0;\n"));
    assert!(out.imp.contains("t$u32 $c = 0;\n"));
}

#[test]
fn character_literals_are_numbers() {
    let out = compile_ok("fn f() { var c u32 = 'A'; }");
    assert!(out.imp.contains("t$u32 $c = 0x41;\n"));
}

#[test]
fn calls_emit_arguments_in_order() {
    let out = compile_ok("fn f(x u32) { writes(1, \"hi\\n\"); writex(1, x + 1); }");
    assert!(out.imp.contains("fn_writes(0x1, (void*)\"hi\\x0a\");\n"));
    assert!(out.imp.contains("fn_writex(0x1, ($x + 0x1));\n"));
}

#[test]
fn functions_may_be_called_before_definition() {
    let out = compile_ok("fn f() { g(); }\nfn g() { }");
    assert!(out.imp.contains("fn_g();\n"));
    assert!(out.decl.contains("t$void fn_g();\n"));
}

#[test]
fn call_results_have_the_return_type() {
    let out = compile_ok(
        "struct P { x u32, };\n\
         fn make() P { var p P; return p; }\n\
         fn f() { var p P = make(); p.x = 1; }",
    );
    assert!(out.imp.contains("t$P *$p = fn_make();\n"));
}

#[test]
fn new_lowers_to_calloc() {
    let out = compile_ok(
        "struct Node { next *Node, };\nfn f() { var n Node = new(Node); }",
    );
    assert!(out.imp.contains("t$Node *$n = calloc(1, sizeof(t$Node));\n"));
}

#[test]
fn indexing_strings_and_arrays() {
    let out = compile_ok(
        "fn f(s str, a [4]u32) u32 { var c u32 = s[0]; return a[c + 1]; }",
    );
    assert!(out.imp.contains("t$u32 $c = $s[0x0];\n"));
    assert!(out.imp.contains("return $a[($c + 0x1)];\n"));
}

#[test]
fn indexing_a_scalar_is_fatal() {
    let message = compile_err("fn f(x u32) { x[0] = 1; }");
    assert_eq!(message, "cannot index this type");
}

#[test]
fn chained_field_access() {
    let out = compile_ok(
        "struct Node { next *Node, value u32, };\n\
         fn f(n Node) u32 { return n.next.value; }",
    );
    assert!(out.imp.contains("return $n->next->value;\n"));
}

#[test]
fn undefined_identifier_is_fatal() {
    let message = compile_err("fn f() { ghost = 1; }");
    assert_eq!(message, "undefined identifier 'ghost'");
}

// ---------------------------------------------------------------------------
// The error(...) special form
// ---------------------------------------------------------------------------

#[test]
fn error_call_lowers_to_statement_expression() {
    let out = compile_ok("fn f() { var x u32; error(\"oops \", x); }");
    assert!(out.imp.contains(
        "({ fn_error_begin(); fn_writes(2, (void*)\"oops \"); fn_writex(2, $x); fn_error_end(); });\n"
    ));
}

#[test]
fn error_call_selects_writes_for_str_identifiers() {
    let out = compile_ok("fn f() { var m str = \"bad\"; error(m); }");
    assert!(out
        .imp
        .contains("({ fn_error_begin(); fn_writes(2, $m); fn_error_end(); });\n"));
}

#[test]
fn error_call_numbers_go_through_writex() {
    let out = compile_ok("fn f() { error(42); }");
    assert!(out
        .imp
        .contains("({ fn_error_begin(); fn_writex(2, 0x2a); fn_error_end(); });\n"));
}

// ---------------------------------------------------------------------------
// Type positions
// ---------------------------------------------------------------------------

#[test]
fn pointer_function_and_anonymous_struct_types_are_rejected() {
    assert_eq!(
        compile_err("var p *u32;"),
        "pointer types are not supported"
    );
    assert_eq!(
        compile_err("var f fn;"),
        "function types are not supported"
    );
    assert_eq!(
        compile_err("var s struct;"),
        "anonymous struct types are not supported"
    );
}

#[test]
fn undefined_type_is_fatal() {
    assert_eq!(compile_err("var x Phantom;"), "undefined type 'Phantom'");
}

#[test]
fn unexpected_top_level_token_is_fatal() {
    let message = compile_err("return 1;");
    assert_eq!(message, "expected a top-level declaration, found 'return'");
}

#[test]
fn error_lines_point_at_the_offending_line() {
    let err = crate::compile(b"fn f() {\n    break;\n}\n", "out").unwrap_err();
    assert_eq!(err.line(), Some(2));
}
