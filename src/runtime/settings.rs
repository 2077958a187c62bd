use crate::config::Settings;

/// Settings plus, when defaults had to be used, the reason why.
pub struct LoadedSettings {
    pub settings: Settings,
    pub fallback: Option<String>,
}

/// Load and validate settings. Never fails: a broken config means defaults.
pub fn load_settings() -> LoadedSettings {
    let fallback = match Settings::load() {
        Ok(settings) => match settings.validate() {
            Ok(()) => {
                return LoadedSettings {
                    settings,
                    fallback: None,
                };
            }
            Err(msg) => format!("invalid config, using defaults: {msg}"),
        },
        Err(e) => format!("failed to load config, using defaults: {e}"),
    };

    // The logger is not up yet; the caller logs `fallback` once it is.
    eprintln!("mixdeck: {fallback}");
    LoadedSettings {
        settings: Settings::default(),
        fallback: Some(fallback),
    }
}
