use tempo_config::{ENV_PREFIX, SECTIONS, TempoConfig};

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &TempoConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &TempoConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.gitlab.is_configured() && has_env_prefix(&env_keys, "TEMPO_GITLAB") {
        warnings.push(
            "GitLab config appears default while TEMPO_GITLAB* env vars exist. Use double underscores (example: TEMPO_GITLAB__TOKEN)."
                .to_string(),
        );
    }

    for key in &env_keys {
        if let Some(section) = single_underscore_section(key) {
            warnings.push(format!(
                "{key} is ignored. Use double underscores after the section (example: {ENV_PREFIX}{}__...).",
                section.to_uppercase()
            ));
        }
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

/// The section a `TEMPO_{SECTION}_{KEY}` variable was meant for.
fn single_underscore_section(key: &str) -> Option<&'static str> {
    let rest = key.strip_prefix(ENV_PREFIX)?.to_lowercase();
    SECTIONS.iter().copied().find(|section| {
        rest.strip_prefix(section)
            .is_some_and(|tail| tail.starts_with('_') && !tail.starts_with("__"))
    })
}
