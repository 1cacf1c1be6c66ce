use crate::{Dialect, Result};

/// Prints the shell dialect detected from an executable path
#[derive(clap::Args)]
#[clap(visible_alias = "d")]
pub struct Detect {
    /// Path or name of the shell executable
    pub executable: String,
}

impl Detect {
    pub fn run(&self) -> Result<()> {
        println!("{}", Dialect::detect(&self.executable));
        Ok(())
    }
}
