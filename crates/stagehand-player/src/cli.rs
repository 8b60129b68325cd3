use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};

pub const USAGE: &str =
    "usage: stagehand-player [--manifest <path>] [--frames <n>] [--fixed-step] [--no-watch] [--log <filter>]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerArgs {
    pub manifest: PathBuf,
    /// Stop after this many frames. Runs until the actor exits otherwise.
    pub frames: Option<u64>,
    pub fixed_step: bool,
    pub watch: bool,
    pub log: Option<String>,
    pub help: bool,
}

impl Default for PlayerArgs {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("stage.json"),
            frames: None,
            fixed_step: false,
            watch: true,
            log: None,
            help: false,
        }
    }
}

impl PlayerArgs {
    pub fn parse_from_env() -> Result<Self> {
        Self::parse(env::args())
    }

    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = PlayerArgs::default();
        let mut iter = args.into_iter();
        let _ = iter.next(); // skip program name if present
        while let Some(raw_flag) = iter.next() {
            let flag = raw_flag.as_ref();
            match flag {
                "--fixed-step" => parsed.fixed_step = true,
                "--no-watch" => parsed.watch = false,
                "-h" | "--help" => parsed.help = true,
                "--manifest" | "--frames" | "--log" => {
                    let value =
                        iter.next().ok_or_else(|| anyhow!("Expected a value after '{flag}'"))?.as_ref().to_string();
                    match flag {
                        "--manifest" => parsed.manifest = PathBuf::from(value),
                        "--frames" => {
                            parsed.frames =
                                Some(value.parse::<u64>().with_context(|| format!("Invalid frame count '{value}'"))?);
                        }
                        _ => parsed.log = Some(value),
                    }
                }
                _ if flag.starts_with("--") => bail!("Unknown flag '{flag}'.\n{USAGE}"),
                _ => bail!("Unexpected argument '{flag}'.\n{USAGE}"),
            }
        }
        Ok(parsed)
    }
}
