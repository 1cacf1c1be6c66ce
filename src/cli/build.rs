use crate::builder::{self, CommandSpec, EnvPatch};
use crate::{Dialect, Result};

/// Builds one injectable command line for a running shell
#[derive(clap::Args)]
#[clap(visible_alias = "b")]
pub struct Build {
    /// Path or name of the target shell executable
    #[clap(short, long, value_name = "EXE")]
    pub shell: String,
    /// Working directory to change into before the command runs
    #[clap(long, value_name = "DIR")]
    pub cwd: Option<String>,
    /// Environment overrides, applied in order before any removals
    #[clap(short, long = "env", value_name = "KEY=VALUE")]
    pub env: Vec<String>,
    /// Environment variables to remove in the target shell
    #[clap(short, long = "unset", value_name = "KEY")]
    pub unset: Vec<String>,
    /// The command and its arguments
    #[clap(required = true, last = true)]
    pub args: Vec<String>,
}

impl Build {
    pub fn run(&self) -> Result<()> {
        let mut env = EnvPatch::new();
        for entry in &self.env {
            let (key, value) = builder::parse_env_entry(entry)?;
            env.insert(key, Some(value));
        }
        for key in &self.unset {
            env.insert(key.clone(), None);
        }
        let mut spec = CommandSpec::new(self.args.iter().cloned());
        spec.cwd = self.cwd.clone().unwrap_or_default();
        spec.env = env;
        let line = builder::build(Dialect::detect(&self.shell), &spec)?;
        println!("{line}");
        Ok(())
    }
}
