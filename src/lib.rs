pub mod error;
pub mod fs;
pub mod graph;
pub mod load;
pub mod parse;
pub mod process;
pub mod progress;
pub mod run;
pub mod scanner;
mod signal;
pub mod trace;
pub mod work;

#[cfg(not(any(windows, target_arch = "wasm32")))]
use jemallocator::Jemalloc;

#[cfg(not(any(windows, target_arch = "wasm32")))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;
