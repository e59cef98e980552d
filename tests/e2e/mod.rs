//! Support code for e2e tests, which run minimake as a binary.

mod basic;
mod missing;

pub fn minimake_binary() -> std::path::PathBuf {
    std::env::current_exe()
        .expect("test binary path")
        .parent()
        .expect("test binary directory")
        .parent()
        .expect("binary directory")
        .join("minimake")
}

pub fn minimake_command(args: Vec<&str>) -> std::process::Command {
    let mut cmd = std::process::Command::new(minimake_binary());
    cmd.args(args);
    cmd
}

fn print_output(out: &std::process::Output) {
    // Gross: use print! instead of writing to stdout so Rust test
    // framework can capture it.
    print!("{}", std::str::from_utf8(&out.stdout).unwrap());
    print!("{}", std::str::from_utf8(&out.stderr).unwrap());
}

pub fn stdout(out: &std::process::Output) -> &str {
    std::str::from_utf8(&out.stdout).unwrap()
}

pub fn assert_stderr_contains(out: &std::process::Output, text: &str) {
    let err = std::str::from_utf8(&out.stderr).unwrap();
    if !err.contains(text) {
        panic!(
            "assertion failed; expected stderr to contain {:?} but got:\n{}",
            text, err
        );
    }
}

/// Manages a temporary directory for invoking minimake.
pub struct TestSpace {
    dir: tempfile::TempDir,
}
impl TestSpace {
    pub fn new() -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        Ok(TestSpace { dir })
    }

    pub fn path(&self, path: &str) -> std::path::PathBuf {
        self.dir.path().join(path)
    }

    /// Write a file into the working space.
    pub fn write(&self, path: &str, content: &str) -> std::io::Result<()> {
        std::fs::write(self.path(path), content)
    }

    /// Read a file from the working space.
    pub fn read(&self, path: &str) -> std::io::Result<Vec<u8>> {
        std::fs::read(self.path(path))
    }

    pub fn exists(&self, path: &str) -> bool {
        self.path(path).exists()
    }

    /// Set a file's mtime, in seconds since the epoch.  Tests pin times
    /// rather than relying on the clock advancing between writes.
    pub fn set_mtime(&self, path: &str, secs: i64) -> std::io::Result<()> {
        filetime::set_file_mtime(self.path(path), filetime::FileTime::from_unix_time(secs, 0))
    }

    /// Invoke minimake, returning process output.
    pub fn run(&self, cmd: &mut std::process::Command) -> std::io::Result<std::process::Output> {
        cmd.current_dir(self.dir.path()).output()
    }

    /// Like run, but also print output if the build failed.
    pub fn run_expect(
        &self,
        cmd: &mut std::process::Command,
    ) -> anyhow::Result<std::process::Output> {
        let out = self.run(cmd)?;
        if !out.status.success() {
            print_output(&out);
            anyhow::bail!("build failed, status {}", out.status);
        }
        Ok(out)
    }

    /// Like run, but expect the build to fail.
    pub fn run_fail(&self, cmd: &mut std::process::Command) -> anyhow::Result<std::process::Output> {
        let out = self.run(cmd)?;
        if out.status.success() {
            print_output(&out);
            anyhow::bail!("build unexpectedly succeeded");
        }
        assert_eq!(out.status.code(), Some(1));
        Ok(out)
    }

    /// Persist the temp dir locally and abort the test.  Debugging helper.
    #[allow(dead_code, deprecated)]
    pub fn eject(self) -> ! {
        panic!("ejected at {:?}", self.dir.into_path());
    }
}

/// The classic compile-and-link example.
pub const APP_RULES: &str = "app: main.o util.o
\ttouch app
main.o: main.c
\ttouch main.o
util.o: util.c
\ttouch util.o
";
