use super::*;

#[test]
fn test_cli_definition_is_valid() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn test_ensure_collects_repeated_set_pairs() {
    let cli = Cli::try_parse_from([
        "config-updater",
        "ensure",
        "app.yml",
        "--set",
        "server.port=9090",
        "--set",
        "server.host=edge",
        "--shallow",
    ])
    .unwrap();

    match cli.command {
        Commands::Ensure(args) => {
            assert_eq!(args.path, PathBuf::from("app.yml"));
            assert_eq!(
                args.set,
                vec![
                    ("server.port".to_string(), "9090".to_string()),
                    ("server.host".to_string(), "edge".to_string()),
                ]
            );
            assert!(args.shallow);
        }
        _ => panic!("Expected Ensure"),
    }
}

#[test]
fn test_malformed_set_pair_is_rejected() {
    let result = Cli::try_parse_from(["config-updater", "preview", "app.yml", "--set", "port"]);

    assert!(result.is_err());
}

#[test]
fn test_replace_conflicts_with_shallow() {
    let result = Cli::try_parse_from([
        "config-updater",
        "check",
        "app.yml",
        "--replace",
        "--shallow",
    ]);

    assert!(result.is_err());
}

#[test]
fn test_explicit_type_flag() {
    let cli = Cli::try_parse_from(["config-updater", "preview", "app.conf", "-t", "ini"]).unwrap();

    match cli.command {
        Commands::Preview(args) => assert_eq!(args.file_type.as_deref(), Some("ini")),
        _ => panic!("Expected Preview"),
    }
}
