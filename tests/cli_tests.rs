#[cfg(test)]
mod tests {
    use clap::Parser;
    use melodygrid::cli::*;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_encode_with_overrides() {
        let args = Args::parse_from([
            "test",
            "encode",
            "AutumnLeaves.mid",
            "Blues.mid",
            "--track",
            "guitar",
            "--subdivision",
            "16",
            "--render",
            "training.mid",
        ]);
        match args.command {
            Command::Encode {
                inputs,
                track,
                subdivision,
                render,
                raw,
                force,
                output_dir,
            } => {
                assert_eq!(
                    inputs,
                    vec![PathBuf::from("AutumnLeaves.mid"), PathBuf::from("Blues.mid")]
                );
                assert_eq!(track, Some("guitar".to_string()));
                assert_eq!(subdivision, Some(16));
                assert_eq!(render, Some("training.mid".to_string()));
                assert!(!raw);
                assert!(!force);
                assert_eq!(output_dir, None);
            }
            other => panic!("Expected encode, got {:?}", other),
        }
    }

    #[test]
    fn test_encode_requires_input() {
        assert!(Args::try_parse_from(["test", "encode"]).is_err());
    }

    #[test]
    fn test_decode_arguments() {
        let args = Args::parse_from([
            "test",
            "--verbose",
            "decode",
            "generated.json",
            "--output",
            "generation.mid",
            "--ticks-per-beat",
            "960",
        ]);
        assert!(args.verbose);
        match args.command {
            Command::Decode {
                input,
                output,
                ticks_per_beat,
                subdivision,
                ..
            } => {
                assert_eq!(input, PathBuf::from("generated.json"));
                assert_eq!(output, "generation.mid");
                assert_eq!(ticks_per_beat, Some(960));
                assert_eq!(subdivision, None);
            }
            other => panic!("Expected decode, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_requires_output_name() {
        assert!(Args::try_parse_from(["test", "decode", "generated.json"]).is_err());
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let args = Args::parse_from(["test", "inspect", "song.mid", "--config", "alt.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("alt.toml")));
    }

    #[test]
    fn test_token_output_path() {
        let path = token_output_path(Path::new("output"), Path::new("data/AutumnLeaves.mid"));
        assert_eq!(path, PathBuf::from("output/AutumnLeaves.tokens.json"));
    }

    #[test]
    fn test_valid_output_name() {
        assert!(validate_output_name("generation.mid").is_ok());
    }

    #[test]
    fn test_invalid_output_names() {
        for name in ["", "../escape.mid", "nested/out.mid", ".."] {
            assert!(
                validate_output_name(name).is_err(),
                "Output name '{}' should be rejected",
                name
            );
        }
    }
}
