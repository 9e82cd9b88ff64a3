//! qrmaker command-line entrypoint

use clap::Parser;
use qrmaker::cli::{Cli, Command, generate, verify};
use qrmaker::{Encoder, QrmakerConfig, Result, Session, logging, shell};
use std::io::Read;
use tokio::io::BufReader;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = QrmakerConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    logging::init(&config.logging)?;

    let mut stdout = std::io::stdout();

    match &cli.command {
        Command::Shell => {
            let encoder = Encoder::with_options(config.encoder.clone());
            let mut session = Session::new(encoder, config.render_options()?);
            let stdin = BufReader::new(tokio::io::stdin());
            shell::run(stdin, &mut stdout, &mut session, &config.export.directory).await
        }
        Command::Verify { path } => verify(path, cli.json, &mut stdout),
        command => {
            if let Some(form) = command.form_state(read_stdin)? {
                generate(&cli, form, &config, &mut stdout)?;
            }
            Ok(())
        }
    }
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(text)
}
