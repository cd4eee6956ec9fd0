use filededupe::cli::{normalize_args, Cli, OutputFormat};
use std::path::PathBuf;

#[test]
fn test_mixed_flags_and_directories() {
    let cli = Cli::parse_legacy([
        "filededupe",
        "/photos",
        "-NOSUBDIRS",
        "/backup",
        "-what",
        "--verify",
    ])
    .unwrap();

    assert!(cli.nosubdirs);
    assert!(cli.verify);
    assert_eq!(
        cli.dirs,
        vec![PathBuf::from("/photos"), PathBuf::from("/backup")]
    );
    assert_eq!(cli.invalid_args, vec!["-what"]);
}

#[test]
fn test_help_anywhere_wins() {
    for flag in ["-h", "-help", "--h", "--help"] {
        let err = Cli::parse_legacy(["filededupe", "/dir", flag]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp, "{}", flag);
    }
}

#[test]
fn test_version_flag() {
    let err = Cli::parse_legacy(["filededupe", "--version"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
}

#[test]
fn test_only_invalid_flags() {
    let cli = Cli::parse_legacy(["filededupe", "-x", "--y"]).unwrap();

    assert!(cli.dirs.is_empty());
    assert_eq!(cli.invalid_args, vec!["-x", "--y"]);
}

#[test]
fn test_output_flag_is_case_insensitive_on_name() {
    let cli = Cli::parse_legacy(["filededupe", "-OUTPUT", "json", "/d"]).unwrap();
    assert_eq!(cli.output, Some(OutputFormat::Json));
}

#[test]
fn test_missing_value_is_a_clap_error() {
    let n = normalize_args(["filededupe", "--threads"]);
    assert_eq!(n.args, vec!["filededupe", "--threads"]);
    assert!(Cli::parse_legacy(["filededupe", "--threads"]).is_err());
}

#[test]
fn test_directory_names_are_untouched() {
    let cli = Cli::parse_legacy(["filededupe", "My Documents", "a-b", "NOSUBDIRS"]).unwrap();

    assert!(!cli.nosubdirs);
    assert_eq!(cli.dirs.len(), 3);
    assert!(cli.invalid_args.is_empty());
}
