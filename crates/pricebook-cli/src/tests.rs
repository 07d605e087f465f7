use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["pricebook"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_extract_with_defaults() {
    let cli = Cli::try_parse_from(["pricebook", "extract", "https://shop.example/p/1"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Extract {
            ref url,
            no_render: false,
            compact: false,
        }) if url == "https://shop.example/p/1"
    ));
}

#[test]
fn parses_extract_flags() {
    let cli = Cli::try_parse_from([
        "pricebook",
        "extract",
        "https://shop.example/p/1",
        "--no-render",
        "--compact",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Extract {
            no_render: true,
            compact: true,
            ..
        })
    ));
}

#[test]
fn extract_requires_url() {
    assert!(Cli::try_parse_from(["pricebook", "extract"]).is_err());
}

#[test]
fn parses_parse_with_url() {
    let cli = Cli::try_parse_from([
        "pricebook",
        "parse",
        "page.html",
        "--url",
        "https://www.amazon.co.uk/dp/B0",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Parse {
            ref file,
            url: Some(ref u),
            compact: false,
        }) if file == &PathBuf::from("page.html") && u == "https://www.amazon.co.uk/dp/B0"
    ));
}

#[test]
fn parses_parse_from_stdin() {
    let cli = Cli::try_parse_from(["pricebook", "parse", "-"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Parse { ref file, url: None, .. }) if file == &PathBuf::from("-")
    ));
}

#[test]
fn parses_price_text() {
    let cli = Cli::try_parse_from(["pricebook", "price", "1.234,56 EUR"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Price { ref text }) if text == "1.234,56 EUR"
    ));
}

#[test]
fn unknown_command_is_rejected() {
    assert!(Cli::try_parse_from(["pricebook", "collect"]).is_err());
}
