use crate::fs::RealFileSystem;
use crate::process::ShellRunner;
use crate::progress::{ConsoleProgress, Progress};
use crate::{load, signal, trace, work};
use anyhow::anyhow;
use argh::FromArgs;
use std::path::Path;

#[derive(FromArgs)]
/// Rebuild a target whose dependencies have changed.
struct Args {
    /// chdir before running
    #[argh(option, short = 'C')]
    chdir: Option<String>,

    /// input rule file [default=myMakefile]
    #[argh(option, short = 'f', default = "String::from(\"myMakefile\")")]
    file: String,

    /// debugging tools, "-d list" to list
    #[argh(option, short = 'd')]
    debug: Option<String>,

    /// target to build [default=first target in the rule file]
    #[argh(positional)]
    target: Option<String>,
}

/// Load the rule file and build the requested (or default) target.
fn build(args: &Args, progress: &mut ConsoleProgress) -> anyhow::Result<()> {
    let state = trace::scope("load::read", || load::read(Path::new(&args.file)))?;

    let name = match (&args.target, state.default) {
        (Some(name), _) => name.clone(),
        (None, Some(id)) => state.graph.node(id).name.clone(),
        (None, None) => anyhow::bail!("no target specified and no targets in {}", args.file),
    };

    let fs = RealFileSystem::new();
    let mut runner = ShellRunner::new();
    let mut work = work::Work::new(&state.graph, &fs, &mut runner, progress);
    let rebuilt = trace::scope("work.build", || work.build(&name))?;
    if rebuilt == 0 {
        progress.log(&format!("{} is up to date.", name));
    }
    Ok(())
}

fn run_impl() -> anyhow::Result<i32> {
    let strings: Vec<String> = std::env::args().collect();
    let argv: Vec<&str> = strings.iter().map(|s| s.as_str()).collect();
    let cmd = match argv.first() {
        Some(path) => Path::new(path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("minimake"),
        None => "minimake",
    };
    let rest = argv.get(1..).unwrap_or(&[]);
    let args = match Args::from_args(&[cmd], rest) {
        Ok(args) => args,
        Err(early) => {
            return match early.status {
                Ok(()) => {
                    print!("{}", early.output);
                    Ok(0)
                }
                Err(()) => {
                    eprint!("{}", early.output);
                    Ok(1)
                }
            };
        }
    };

    if let Some(debug) = &args.debug {
        match debug.as_str() {
            "list" => {
                println!("debug tools:");
                println!("  trace  generate json performance trace");
                return Ok(1);
            }
            "trace" => trace::open("trace.json")?,
            _ => anyhow::bail!("unknown -d {:?}, use -d list to list", debug),
        }
    }

    if let Some(dir) = &args.chdir {
        let dir = Path::new(dir);
        std::env::set_current_dir(dir).map_err(|err| anyhow!("chdir {:?}: {}", dir, err))?;
    }

    signal::register_sigint();
    let mut progress = ConsoleProgress::new();
    build(&args, &mut progress)?;
    Ok(0)
}

pub fn run() -> anyhow::Result<i32> {
    let res = run_impl();
    // A broken trace shouldn't mask the build's own result.
    let _ = trace::close();
    res
}
