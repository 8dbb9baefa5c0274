//! Commented default config written on first run.

/// Generate the default TOML config content with comments.
pub fn default_config_toml() -> &'static str {
    r##"# attire configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[model]
# backend = "ollama"              # ollama, gemini
# model = "llama3.2"              # default: llama3.2 (ollama), gemini-2.0-flash (gemini)
# endpoint = "http://localhost:11434"
# api_key_env = "GEMINI_API_KEY"  # env var read when backend = "gemini"
# connect_timeout_secs = 10       # 1-60
# request_timeout_secs = 300      # 5-3600
# max_tokens = 1024               # 64-8192

[generation]
# Slider defaults used when the model service cannot report its own.
# temperature = 1.0               # 0.0-2.0
# top_k = 3                       # 1-128

[panel]
# weather_options = ["Sunny", "Cloudy", "Rainy", "Snowy", "Windy", "Hot", "Cold"]
# occasion_options = ["Casual", "Business Meeting", "Formal Event", "Date Night", "Workout", "Outdoor Activity", "Party"]
# max_preferences_len = 4096

[logging]
# level = "info"                  # trace, debug, info, warn, error
"##
}
