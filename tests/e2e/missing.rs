use crate::e2e::*;

#[test]
fn dangling_dependency() -> anyhow::Result<()> {
    let space = TestSpace::new()?;
    space.write(
        "myMakefile",
        "app: lib.o
\ttouch app
lib.o: lib.c
\ttouch lib.o
",
    )?;
    let out = space.run_fail(&mut minimake_command(vec![]))?;
    assert_stderr_contains(&out, "dependency \"lib.c\" does not exist");
    assert_eq!(stdout(&out), "");
    assert!(!space.exists("lib.o"));
    Ok(())
}

#[test]
fn missing_rule_file() -> anyhow::Result<()> {
    let space = TestSpace::new()?;
    let out = space.run_fail(&mut minimake_command(vec![]))?;
    assert_stderr_contains(&out, "minimake: error: read myMakefile");
    Ok(())
}

#[test]
fn unknown_target() -> anyhow::Result<()> {
    let space = TestSpace::new()?;
    space.write("myMakefile", "app: main.c\n\ttouch app\n")?;
    space.write("main.c", "")?;
    let out = space.run_fail(&mut minimake_command(vec!["main.c"]))?;
    assert_stderr_contains(&out, "target \"main.c\" not specified in graph");
    Ok(())
}

#[test]
fn empty_rule_file() -> anyhow::Result<()> {
    let space = TestSpace::new()?;
    space.write("myMakefile", "\n")?;
    let out = space.run_fail(&mut minimake_command(vec![]))?;
    assert_stderr_contains(&out, "no target specified");
    Ok(())
}

#[test]
fn duplicate_target() -> anyhow::Result<()> {
    let space = TestSpace::new()?;
    space.write("myMakefile", "a: b\nb:\na: c\n")?;
    let out = space.run_fail(&mut minimake_command(vec![]))?;
    assert_stderr_contains(&out, "myMakefile:3: target \"a\" is already a target");
    Ok(())
}

#[test]
fn parse_error() -> anyhow::Result<()> {
    let space = TestSpace::new()?;
    space.write("myMakefile", "\ttouch a\na:\n")?;
    let out = space.run_fail(&mut minimake_command(vec![]))?;
    assert_stderr_contains(&out, "command found before any target");
    assert_stderr_contains(&out, "myMakefile:1:");
    Ok(())
}
