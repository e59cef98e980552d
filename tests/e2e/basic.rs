use crate::e2e::*;

#[test]
fn compile_and_link() -> anyhow::Result<()> {
    let space = TestSpace::new()?;
    space.write("myMakefile", APP_RULES)?;
    space.write("main.c", "")?;
    space.write("util.c", "")?;
    let out = space.run_expect(&mut minimake_command(vec!["app"]))?;
    assert_eq!(stdout(&out), "touch main.o\ntouch util.o\ntouch app\n");
    assert!(space.exists("app"));
    Ok(())
}

#[test]
fn second_run_is_up_to_date() -> anyhow::Result<()> {
    let space = TestSpace::new()?;
    space.write("myMakefile", APP_RULES)?;
    space.write("main.c", "")?;
    space.write("util.c", "")?;
    space.run_expect(&mut minimake_command(vec![]))?;

    // Pin times so the comparison doesn't depend on filesystem granularity.
    space.set_mtime("main.c", 100)?;
    space.set_mtime("util.c", 100)?;
    space.set_mtime("main.o", 200)?;
    space.set_mtime("util.o", 200)?;
    space.set_mtime("app", 300)?;
    let out = space.run_expect(&mut minimake_command(vec![]))?;
    assert_eq!(stdout(&out), "app is up to date.\n");
    Ok(())
}

#[test]
fn changed_source_rebuilds_dependents() -> anyhow::Result<()> {
    let space = TestSpace::new()?;
    space.write("myMakefile", APP_RULES)?;
    for f in &["main.c", "util.c", "main.o", "util.o", "app"] {
        space.write(f, "")?;
    }
    space.set_mtime("main.c", 500)?;
    space.set_mtime("util.c", 100)?;
    space.set_mtime("main.o", 200)?;
    space.set_mtime("util.o", 200)?;
    space.set_mtime("app", 300)?;

    let out = space.run_expect(&mut minimake_command(vec!["app"]))?;
    assert_eq!(stdout(&out), "touch main.o\ntouch app\n");
    Ok(())
}

#[test]
fn default_is_first_target() -> anyhow::Result<()> {
    let space = TestSpace::new()?;
    space.write(
        "myMakefile",
        "first:
\ttouch first
second:
\ttouch second
",
    )?;
    let out = space.run_expect(&mut minimake_command(vec![]))?;
    assert_eq!(stdout(&out), "touch first\n");
    assert!(!space.exists("second"));

    let out = space.run_expect(&mut minimake_command(vec!["second"]))?;
    assert_eq!(stdout(&out), "touch second\n");
    Ok(())
}

#[test]
fn rule_file_and_directory_flags() -> anyhow::Result<()> {
    let space = TestSpace::new()?;
    std::fs::create_dir(space.path("sub"))?;
    space.write("sub/rules", "out:\n\ttouch out\n")?;
    let out = space.run_expect(&mut minimake_command(vec!["-C", "sub", "-f", "rules"]))?;
    assert_eq!(stdout(&out), "touch out\n");
    assert!(space.exists("sub/out"));
    Ok(())
}

/// Command output shows up before the echoed command line.
#[test]
fn command_output_order() -> anyhow::Result<()> {
    let space = TestSpace::new()?;
    space.write("myMakefile", "say:\n\techo hello\n\techo world\n")?;
    let out = space.run_expect(&mut minimake_command(vec![]))?;
    assert_eq!(stdout(&out), "hello\necho hello\nworld\necho world\n");
    Ok(())
}

#[test]
fn commandless_target_is_quiet() -> anyhow::Result<()> {
    let space = TestSpace::new()?;
    space.write("myMakefile", "all:\n")?;
    let out = space.run_expect(&mut minimake_command(vec![]))?;
    assert_eq!(stdout(&out), "");
    Ok(())
}

#[test]
fn trace_output() -> anyhow::Result<()> {
    let space = TestSpace::new()?;
    space.write("myMakefile", "out:\n\ttouch out\n")?;
    space.run_expect(&mut minimake_command(vec!["-d", "trace"]))?;
    let trace = String::from_utf8(space.read("trace.json")?)?;
    assert!(trace.contains("\"name\": \"command\""));
    assert!(trace.contains("\"name\": \"load::read\""));
    Ok(())
}
