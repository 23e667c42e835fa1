use assert_cmd::Command;
use assert_fs::{prelude::FileWriteStr, NamedTempFile};
use predicates::prelude::predicate;

fn check(instance: &str) -> Result<assert_cmd::assert::Assert, Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("graph.dc")?;
    file.write_str(instance)?;
    let mut cmd = Command::cargo_bin("domchart")?;
    cmd.arg("check")
        .arg("-f")
        .arg(file.path())
        .arg("--logging-level")
        .arg("off");
    let assert = cmd.assert();
    file.close()?;
    Ok(assert)
}

#[test]
fn test_check_normal() -> Result<(), Box<dyn std::error::Error>> {
    let instance = r#"label(x, every).
hole(xh).
label(y, a).
hole(yh).
label(z, love).
tree(x, xh).
tree(y, yh).
dom(xh, z).
dom(yh, z).
"#;
    check(instance)?.success().stdout(predicate::eq(
        "simple: yes\nleaf-labelled: yes\nno-empty-fragments: yes\nweakly-normal: yes\nnormal: yes\ncompact: yes\ncompactifiable: yes\n",
    ));
    Ok(())
}

#[test]
fn test_check_not_compact() -> Result<(), Box<dyn std::error::Error>> {
    let instance = r#"label(x, f).
label(a, c).
hole(xh).
label(z, g).
tree(x, a).
tree(x, xh).
dom(xh, z).
"#;
    check(instance)?
        .success()
        .stdout(predicate::str::contains("compact: no\n"))
        .stdout(predicate::str::contains("compactifiable: yes\n"));
    Ok(())
}

#[test]
fn test_check_unknown_node() -> Result<(), Box<dyn std::error::Error>> {
    check("hole(xh).\ndom(xh, z).\n")?.failure();
    Ok(())
}

#[test]
fn test_check_node_after_edge() -> Result<(), Box<dyn std::error::Error>> {
    check("label(x, f).\nhole(xh).\ntree(x, xh).\nhole(yh).\n")?.failure();
    Ok(())
}
