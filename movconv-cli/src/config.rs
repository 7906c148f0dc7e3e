// movconv-cli/src/config.rs
//
// Turns parsed command-line arguments into the `CoreConfig` handed to the
// batch scanner. Directory paths only ever travel this way; nothing is kept
// in globals.

use crate::cli::{BatchArgs, CodecArgs, InteractiveArgs};
use crate::error::CliResult;
use movconv_core::CoreConfig;
use std::path::{Path, PathBuf};

fn build(
    root: &Path,
    input_dir: Option<&PathBuf>,
    output_dir: Option<&PathBuf>,
    codecs: &CodecArgs,
) -> CoreConfig {
    let mut config = CoreConfig::from_root(root);
    if let Some(dir) = input_dir {
        config.input_dir = dir.clone();
    }
    if let Some(dir) = output_dir {
        config.output_dir = dir.clone();
    }
    config.video_codec = codecs.video_codec.clone();
    config.audio_codec = codecs.audio_codec.clone();
    config
}

impl BatchArgs {
    /// Batch mode expects the output directory to exist already.
    pub fn to_core_config(&self) -> CliResult<CoreConfig> {
        let config = build(
            &self.root,
            self.input_dir.as_ref(),
            self.output_dir.as_ref(),
            &self.codecs,
        );
        config.validate()?;
        Ok(config)
    }
}

impl InteractiveArgs {
    /// Interactive mode creates the output directory when a run starts.
    pub fn to_core_config(&self) -> CliResult<CoreConfig> {
        let mut config = build(
            &self.root,
            self.input_dir.as_ref(),
            self.output_dir.as_ref(),
            &self.codecs,
        );
        config.create_output_dir = true;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn batch_defaults_to_root_subdirs() {
        let cli = Cli::parse_from(["movconv", "batch", "--root", "/project"]);
        let Commands::Batch(args) = cli.command else {
            panic!("expected batch command");
        };
        let config = args.to_core_config().unwrap();
        assert_eq!(config.input_dir, PathBuf::from("/project/data"));
        assert_eq!(config.output_dir, PathBuf::from("/project/output"));
        assert!(!config.create_output_dir);
    }

    #[test]
    fn interactive_overrides_and_creates_output() {
        let cli = Cli::parse_from([
            "movconv",
            "interactive",
            "--input",
            "/videos/in",
            "--output",
            "/videos/out",
            "--video-codec",
            "libx265",
        ]);
        let Commands::Interactive(args) = cli.command else {
            panic!("expected interactive command");
        };
        let config = args.to_core_config().unwrap();
        assert_eq!(config.input_dir, PathBuf::from("/videos/in"));
        assert_eq!(config.output_dir, PathBuf::from("/videos/out"));
        assert_eq!(config.video_codec, "libx265");
        assert!(config.create_output_dir);
    }
}
