use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["dealscan-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn classify_defaults_paths_to_config() {
    let cli = Cli::try_parse_from(["dealscan-cli", "classify"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Classify {
            input: None,
            output: None
        })
    ));
}

#[test]
fn classify_accepts_explicit_paths() {
    let cli = Cli::try_parse_from([
        "dealscan-cli",
        "classify",
        "--input",
        "cards.json",
        "--output",
        "deals.json",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Classify {
            input: Some(ref i),
            output: Some(ref o),
        }) if i.to_str() == Some("cards.json") && o.to_str() == Some("deals.json")
    ));
}

#[test]
fn report_accepts_input_only() {
    let cli = Cli::try_parse_from(["dealscan-cli", "report", "--input", "cards.json"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Report {
            input: Some(_),
            output: None
        })
    ));
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["dealscan-cli", "scrape"]).is_err());
}
