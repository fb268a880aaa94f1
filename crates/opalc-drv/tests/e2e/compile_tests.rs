//! Successful compilations: output files and emitted shapes.

use assert_cmd::Command;

use crate::{opalc_bin, read_output, write_source};

#[test]
fn empty_program_outputs() {
    let (dir, path) = write_source("fn start() i32 { return 0; }");
    let base = dir.path().join("prog");

    let mut cmd = Command::new(opalc_bin());
    cmd.arg(&path).arg("-o").arg(&base);
    cmd.assert().success();

    let decl = read_output(&base, ".decl.h");
    assert_eq!(decl, "t$i32 fn_start();\n");

    let imp = read_output(&base, ".impl.c");
    assert!(imp.starts_with(&format!(
        "#include <builtin.type.h>\n#include \"{0}.type.h\"\n#include \"{0}.decl.h\"\n#include <library.impl.h>\n",
        base.display()
    )));
    assert!(imp.contains("\nt$i32 fn_start() {\n    return 0x0;\n}\n"));
    assert!(imp.ends_with("\n#include <library.impl.c>\n"));
}

#[test]
fn enum_auto_numbering() {
    let (dir, path) = write_source("enum { A, B = 5, C, };");
    let base = dir.path().join("prog");

    Command::new(opalc_bin())
        .arg(&path)
        .arg("-o")
        .arg(&base)
        .assert()
        .success();

    let imp = read_output(&base, ".impl.c");
    assert!(imp.contains("#define c$A 0x0\n#define c$B 5\n#define c$C 0x1\n"));
}

#[test]
fn forward_struct_reference() {
    let (dir, path) = write_source(
        "struct Node { next *Node, value u32, };\n\
         fn f() { var n Node; n.value = 1; }\n",
    );
    let base = dir.path().join("prog");

    Command::new(opalc_bin())
        .arg(&path)
        .arg("-o")
        .arg(&base)
        .assert()
        .success();

    let types = read_output(&base, ".type.h");
    assert_eq!(types, "typedef struct t$Node t$Node;\n");

    let decl = read_output(&base, ".decl.h");
    assert!(decl.contains("struct t$Node {\n    t$Node *next;\n    t$u32 value;\n};\n"));

    let imp = read_output(&base, ".impl.c");
    assert!(imp.contains("$n->value = 0x1;\n"));
}

#[test]
fn precedence_and_paren_elision() {
    let (dir, path) = write_source("fn f() i32 { return 1 + 2 * 3 == 7; }");
    let base = dir.path().join("prog");

    Command::new(opalc_bin())
        .arg(&path)
        .arg("-o")
        .arg(&base)
        .assert()
        .success();

    let imp = read_output(&base, ".impl.c");
    assert!(imp.contains("return ((0x1 + (0x2 * 0x3)) == 0x7);\n"));
    // Bare numbers are never wrapped on their own.
    assert!(!imp.contains("(0x7)"));
}

#[test]
fn default_output_base_is_the_source_path() {
    let (_dir, path) = write_source("fn start() i32 { return 0; }");

    Command::new(opalc_bin()).arg(&path).assert().success();

    let decl = read_output(&path, ".decl.h");
    assert_eq!(decl, "t$i32 fn_start();\n");
    read_output(&path, ".type.h");
    read_output(&path, ".impl.c");
}

#[test]
fn runtime_calls_and_loops_compile() {
    let (dir, path) = write_source(
        "var count u32 = 0;\n\
         fn start() i32 {\n\
             while count < 3 {\n\
                 writes(1, \"tick\\n\");\n\
                 count += 1;\n\
             }\n\
             return 0;\n\
         }\n",
    );
    let base = dir.path().join("prog");

    Command::new(opalc_bin())
        .arg(&path)
        .arg("-o")
        .arg(&base)
        .assert()
        .success();

    let imp = read_output(&base, ".impl.c");
    assert!(imp.contains("t$u32 $count = 0x0;\n"));
    assert!(imp.contains("while (($count < 0x3)) {\n"));
    assert!(imp.contains("fn_writes(0x1, (void*)\"tick\\x0a\");\n"));
    assert!(imp.contains("$count += 0x1;\n"));
}
