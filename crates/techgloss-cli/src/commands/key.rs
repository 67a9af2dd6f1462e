//! Key command - inspect or switch the AI API key.

use crate::app::App;
use crate::KeyAction;
use techgloss_core::{Config, KeySelector};

/// Run the key command.
pub fn run(config: Config, action: KeyAction) -> anyhow::Result<()> {
    let app = App::new(config)?;

    match action {
        KeyAction::Status => {
            let env_var = &app.config.gateway.api_key_env;
            let env_set = std::env::var(env_var).map_or(false, |k| !k.trim().is_empty());

            println!("Key file:    {}", app.key_file().display());
            println!(
                "  selected:  {}",
                if app.key_selector.has_selected_api_key() { "yes" } else { "no" }
            );
            println!("Environment: {}", env_var);
            println!("  set:       {}", if env_set { "yes" } else { "no" });
            println!("Gateway:     {}", app.gateway.name());
        }
        KeyAction::Switch => {
            app.key_selector.open_select_key()?;
        }
    }

    Ok(())
}
