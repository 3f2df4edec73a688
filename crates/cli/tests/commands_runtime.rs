use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use botanica_cli::commands::recommend::RecommendOptions;
use botanica_cli::commands::search::SearchOptions;
use botanica_cli::commands::{catalog, config, doctor, recommend, search};
use serde_json::Value;
use tempfile::TempDir;

#[test]
fn config_reports_env_sources() {
    with_env(&[("BOTANICA_SERVER_PORT", "9090"), ("BOTANICA_LOG_LEVEL", "debug")], || {
        let result = config::run();
        assert_eq!(result.exit_code, 0);

        assert!(result.output.contains("- server.port = 9090 (source: env (BOTANICA_SERVER_PORT))"));
        assert!(result.output.contains("- logging.level = debug (source: env (BOTANICA_LOG_LEVEL))"));
        assert!(result.output.contains("- storefront.brand_name = Zen Botanica (source: default)"));
        assert!(result.output.contains("- catalog.path = <built-in sample> (source: default)"));
    });
}

#[test]
fn config_reports_session_limits() {
    with_env(&[("BOTANICA_SESSIONS_IDLE_TTL_SECS", "600")], || {
        let result = config::run();
        assert_eq!(result.exit_code, 0);

        assert!(result
            .output
            .contains("- sessions.idle_ttl_secs = 600 (source: env (BOTANICA_SESSIONS_IDLE_TTL_SECS))"));
        assert!(result.output.contains("- sessions.max_sessions = 10000 (source: default)"));
    });
}

#[test]
fn config_returns_config_failure_for_bad_env_value() {
    with_env(&[("BOTANICA_SERVER_PORT", "eighty")], || {
        let result = config::run();
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "config");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn doctor_passes_with_builtin_catalog() {
    with_env(&[], || {
        let result = doctor::run(true);
        assert_eq!(result.exit_code, 0);

        let report = parse_payload(&result.output);
        assert_eq!(report["overall_status"], "pass");
        let checks = report["checks"].as_array().expect("checks array");
        let names: Vec<&str> = checks.iter().filter_map(|check| check["name"].as_str()).collect();
        assert_eq!(names, ["config_validation", "catalog_load", "catalog_integrity"]);
        assert!(checks[1]["details"].as_str().unwrap_or("").contains("6 products"));
    });
}

#[test]
fn doctor_skips_catalog_checks_when_config_fails() {
    with_env(&[("BOTANICA_STOREFRONT_RECOMMENDATION_LIMIT", "0")], || {
        let result = doctor::run(false);
        assert_eq!(result.exit_code, 2);

        assert!(result.output.starts_with("doctor: one or more readiness checks failed"));
        assert!(result.output.contains("- [fail] config_validation:"));
        assert!(result.output.contains("- [skip] catalog_load:"));
    });
}

#[test]
fn doctor_returns_catalog_failure_for_unparseable_catalog() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("catalog.toml");
    fs::write(&path, "products = \"not a list\"").expect("write catalog");
    let path = path.display().to_string();

    with_env(&[("BOTANICA_CATALOG_PATH", &path)], || {
        let result = doctor::run(true);
        assert_eq!(result.exit_code, 3, "expected catalog failure code");

        let report = parse_payload(&result.output);
        assert_eq!(report["overall_status"], "fail");
        assert_eq!(report["checks"][1]["name"], "catalog_load");
        assert_eq!(report["checks"][1]["status"], "fail");
        assert_eq!(report["checks"][2]["status"], "skipped");
    });
}

#[test]
fn catalog_lists_builtin_products_as_json() {
    with_env(&[], || {
        let result = catalog::run(true);
        assert_eq!(result.exit_code, 0);

        let listing = parse_payload(&result.output);
        assert_eq!(listing["count"], 6);
        assert_eq!(listing["products"][0]["name"], "Tranquil Evening Blend");
        assert_eq!(listing["products"][2]["in_stock"], false);
    });
}

#[test]
fn catalog_returns_catalog_failure_for_duplicate_ids() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("catalog.toml");
    let product = r#"
[[products]]
id = 7
name = "Twin"
description = "d"
price = "$10.00"
original_price = "$12.00"
image = "/twin.png"
benefits = []
rating = 4.0
reviews = 1
brewing_time = "3 min"
temperature = "90C"
ingredients = []
origin = "Nowhere"
in_stock = true
tags = []
"#;
    fs::write(&path, format!("{product}{product}")).expect("write catalog");
    let path = path.display().to_string();

    with_env(&[("BOTANICA_CATALOG_PATH", &path)], || {
        let result = catalog::run(false);
        assert_eq!(result.exit_code, 3);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "catalog_load");
    });
}

#[test]
fn search_matches_ingredients_case_insensitively() {
    with_env(&[], || {
        let result = search::run(&SearchOptions {
            query: Some("GINGER".to_string()),
            ..SearchOptions::default()
        });
        assert_eq!(result.exit_code, 0);

        let report = parse_payload(&result.output);
        assert_eq!(report["summary"], "2 Products Found");
        assert_eq!(report["filtered"], true);
        assert_eq!(product_ids(&report["products"]), [4, 5]);
    });
}

#[test]
fn search_combines_category_price_and_stock() {
    with_env(&[], || {
        let result = search::run(&SearchOptions {
            category: Some("sleep".to_string()),
            max: Some("$25".to_string()),
            availability: Some(true),
            ..SearchOptions::default()
        });

        let report = parse_payload(&result.output);
        assert_eq!(report["summary"], "1 Product Found");
        assert_eq!(product_ids(&report["products"]), [1]);

        let result = search::run(&SearchOptions {
            availability: Some(false),
            ..SearchOptions::default()
        });
        let report = parse_payload(&result.output);
        assert_eq!(product_ids(&report["products"]), [3]);
    });
}

#[test]
fn search_rejects_unparseable_price() {
    with_env(&[], || {
        let result = search::run(&SearchOptions {
            min: Some("cheap".to_string()),
            ..SearchOptions::default()
        });
        assert_eq!(result.exit_code, 4);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "invalid_input");
    });
}

#[test]
fn recommend_uses_configured_preferences_by_default() {
    with_env(&[], || {
        let result = recommend::run(&RecommendOptions::default());
        assert_eq!(result.exit_code, 0);

        let report = parse_payload(&result.output);
        assert_eq!(report["preferences"], serde_json::json!(["wellness", "organic"]));
        assert_eq!(product_ids(&report["results"]), [5, 1, 4, 2]);
        assert_eq!(report["results"][0]["matched_tags"], serde_json::json!(["Wellness", "Organic"]));
    });
}

#[test]
fn recommend_honours_exclusion_and_explicit_preferences() {
    with_env(&[], || {
        let result = recommend::run(&RecommendOptions {
            exclude: Some(5),
            ..RecommendOptions::default()
        });
        let report = parse_payload(&result.output);
        assert_eq!(product_ids(&report["results"]), [1, 4, 2, 6]);

        let result = recommend::run(&RecommendOptions {
            no_preferences: true,
            ..RecommendOptions::default()
        });
        let report = parse_payload(&result.output);
        assert_eq!(product_ids(&report["results"]), [2, 6, 1, 5]);

        let result = recommend::run(&RecommendOptions {
            preferences: vec!["sleep".to_string()],
            limit: Some(2),
            ..RecommendOptions::default()
        });
        let report = parse_payload(&result.output);
        assert_eq!(product_ids(&report["results"]), [6, 1]);
    });
}

#[test]
fn recommend_rejects_out_of_range_limit() {
    with_env(&[], || {
        let result = recommend::run(&RecommendOptions {
            limit: Some(0),
            ..RecommendOptions::default()
        });
        assert_eq!(result.exit_code, 4);
    });
}

fn product_ids(products: &Value) -> Vec<u64> {
    products
        .as_array()
        .map(|items| items.iter().filter_map(|item| item["id"].as_u64()).collect())
        .unwrap_or_default()
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be json")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "BOTANICA_SERVER_BIND_ADDRESS",
        "BOTANICA_SERVER_PORT",
        "BOTANICA_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "BOTANICA_CATALOG_PATH",
        "BOTANICA_CATALOG_ASSET_DIR",
        "BOTANICA_STOREFRONT_BRAND_NAME",
        "BOTANICA_STOREFRONT_RECOMMENDATION_LIMIT",
        "BOTANICA_STOREFRONT_DEFAULT_PREFERENCES",
        "BOTANICA_TIMERS_HERO_INTERVAL_MS",
        "BOTANICA_TIMERS_QUOTE_INTERVAL_MS",
        "BOTANICA_TIMERS_JOURNEY_INTERVAL_MS",
        "BOTANICA_TIMERS_SPLASH_TICK_MS",
        "BOTANICA_SESSIONS_IDLE_TTL_SECS",
        "BOTANICA_SESSIONS_MAX_SESSIONS",
        "BOTANICA_LOGGING_LEVEL",
        "BOTANICA_LOGGING_FORMAT",
        "BOTANICA_LOG_LEVEL",
        "BOTANICA_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
